use std::sync::Once;

use serde::{Serialize, de::DeserializeOwned};
use wordnook_core::{Snapshot, SnapshotStore};

/// Local storage key of a persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

static STORAGE_UNAVAILABLE: Once = Once::new();

/// The window's local storage, `None` when it is missing or blocked (sandboxed frames, blocked cookies).
pub(crate) fn local_storage() -> Option<web_sys::Storage> {
    let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
    if storage.is_none() {
        STORAGE_UNAVAILABLE.call_once(|| log::warn!("local storage unavailable, nothing will be saved"));
    }
    storage
}

fn read_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn write_item(key: &str, data: &str) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Err(err) = storage.set_item(key, data) {
        log::error!("failed to save {}: {:?}", key, err);
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(key: &str, data: Option<&str>) -> T {
    let Some(data) = data else {
        return T::default();
    };
    serde_json::from_str(data).unwrap_or_else(|err| {
        log::warn!("ignoring stored {}: {}", key, err);
        T::default()
    })
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        decode_or_default(T::KEY, read_item(T::KEY).as_deref())
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        match serde_json::to_string(self) {
            Ok(data) => write_item(T::KEY, &data),
            Err(err) => log::error!("failed to encode {}: {}", T::KEY, err),
        }
    }
}

/// Whole-session snapshot kept in local storage.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalSnapshotStore;

impl LocalSnapshotStore {
    pub(crate) const KEY: &'static str = "wordnook:state:v1";
}

fn decode_saved(data: Option<String>) -> Option<Snapshot> {
    match Snapshot::decode(&data?) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            log::warn!("ignoring saved session: {}", err);
            None
        }
    }
}

impl SnapshotStore for LocalSnapshotStore {
    fn load(&self) -> Option<Snapshot> {
        decode_saved(read_item(Self::KEY))
    }

    fn save(&self, snapshot: &Snapshot) {
        match snapshot.encode() {
            Ok(data) => write_item(Self::KEY, &data),
            Err(err) => log::error!("failed to encode session: {}", err),
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
