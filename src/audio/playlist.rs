use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::audio::error::PlaylistError;

const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "flac", "ogg", "wav", "m4a", "aac"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Ordered, non-empty and immutable list of tracks. Order defines what
/// "next" and "previous" mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::Empty);
        }
        Ok(Self { tracks })
    }

    pub fn load(path: &Path) -> Result<Self, PlaylistError> {
        if path.is_dir() {
            Self::from_directory(path)
        } else {
            Self::from_json_file(path)
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PlaylistError> {
        let raw = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tracks: Vec<Track> =
            serde_json::from_str(&raw).map_err(|source| PlaylistError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(tracks)
    }

    pub fn from_directory(path: &Path) -> Result<Self, PlaylistError> {
        let entries = fs::read_dir(path).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_audio_file(p))
            .collect();
        files.sort();

        let tracks = files
            .into_iter()
            .map(|file| {
                let id = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let title = file
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| id.clone());
                Track {
                    id,
                    title,
                    artist: "Unknown".to_string(),
                    audio_url: file.to_string_lossy().into_owned(),
                    thumbnail: None,
                }
            })
            .collect();

        Self::new(tracks)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.tracks.len();
        (index % len + len - 1) % len
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_uppercase(),
            artist: "Artist".to_string(),
            audio_url: format!("https://cdn.example.com/{id}.mp3"),
            thumbnail: None,
        }
    }

    #[test]
    fn rejects_empty_playlist() {
        assert!(matches!(Playlist::new(vec![]), Err(PlaylistError::Empty)));
    }

    #[test]
    fn indices_wrap_in_both_directions() {
        let playlist = Playlist::new(vec![track("a"), track("b"), track("c")]).unwrap();
        assert_eq!(playlist.next_index(0), 1);
        assert_eq!(playlist.next_index(2), 0);
        assert_eq!(playlist.previous_index(0), 2);
        assert_eq!(playlist.previous_index(1), 0);
    }

    #[test]
    fn single_track_wraps_onto_itself() {
        let playlist = Playlist::new(vec![track("solo")]).unwrap();
        assert_eq!(playlist.next_index(0), 0);
        assert_eq!(playlist.previous_index(0), 0);
    }

    #[test]
    fn parses_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        fs::write(
            &path,
            r#"[
                {"id": "1", "title": "Lofi", "artist": "Someone", "audioUrl": "/music/lofi.mp3", "thumbnail": "/img/lofi.png"},
                {"id": "2", "title": "Synth", "artist": "Other", "audioUrl": "/music/synth.mp3"}
            ]"#,
        )
        .unwrap();

        let playlist = Playlist::load(&path).unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.get(0).unwrap().audio_url, "/music/lofi.mp3");
        assert_eq!(
            playlist.get(0).unwrap().thumbnail.as_deref(),
            Some("/img/lofi.png")
        );
        assert_eq!(playlist.get(1).unwrap().thumbnail, None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlist.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            Playlist::from_json_file(&path),
            Err(PlaylistError::Parse { .. })
        ));
    }

    #[test]
    fn directory_playlist_keeps_audio_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.flac", "a.mp3", "cover.jpg", "c.OGG"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let playlist = Playlist::load(dir.path()).unwrap();
        let ids: Vec<&str> = playlist.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a.mp3", "b.flac", "c.OGG"]);
        assert_eq!(playlist.get(0).unwrap().title, "a");
    }
}
