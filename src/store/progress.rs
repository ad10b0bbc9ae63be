use super::LocalStorage;
use crate::error::Result;
use crate::wizard::Track;
use parking_lot::RwLock;
use std::sync::Arc;

/// Furthest-visited step per wizard track, written through to local storage.
#[derive(Clone)]
pub struct WizardProgress {
    storage: LocalStorage,
    pos: Arc<RwLock<(usize, usize)>>,
}

fn storage_key(track: Track) -> &'static str {
    match track {
        Track::Pre => "prePos",
        Track::Post => "postPos",
    }
}

impl WizardProgress {
    /// Missing or unparsable stored values read as 0.
    pub fn load(storage: LocalStorage) -> Result<Self> {
        let read = |track| -> Result<usize> {
            Ok(storage
                .get(storage_key(track))?
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0))
        };
        let pos = (read(Track::Pre)?, read(Track::Post)?);
        Ok(Self {
            storage,
            pos: Arc::new(RwLock::new(pos)),
        })
    }

    pub fn pos(&self, track: Track) -> usize {
        let pos = self.pos.read();
        match track {
            Track::Pre => pos.0,
            Track::Post => pos.1,
        }
    }

    pub fn set_pos(&self, track: Track, idx: usize) -> Result<()> {
        {
            let mut pos = self.pos.write();
            match track {
                Track::Pre => pos.0 = idx,
                Track::Post => pos.1 = idx,
            }
        }
        self.storage.set(storage_key(track), &idx.to_string())
    }
}
