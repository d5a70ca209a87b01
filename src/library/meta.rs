use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;

/// Tag data shown in the metadata popup. Never persisted; the catalog
/// document stays a plain name -> path mapping.
pub struct SongMeta {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Duration,
}

/// Read tags and duration for a song file on demand.
///
/// Returns `None` when the file is missing or not parseable as audio; the
/// popup then falls back to catalog data only.
pub fn probe(path: &Path) -> Option<SongMeta> {
    let tagged = lofty::read_from_path(path).ok()?;
    let duration = tagged.properties().duration();

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());

    fn non_empty(v: Option<impl AsRef<str>>) -> Option<String> {
        v.map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    Some(SongMeta {
        title: non_empty(tag.and_then(|t| t.title())),
        artist: non_empty(tag.and_then(|t| t.artist())),
        album: non_empty(tag.and_then(|t| t.album())),
        duration,
    })
}
