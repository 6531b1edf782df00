#![warn(clippy::pedantic)]

use std::{cell::RefCell, collections::BTreeMap};

use gloo_storage::Storage as GlooStorage;
use gymlog_domain as domain;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;

/// A durable key-value store holding one JSON document per key.
pub trait KeyValueStore {
    /// Returns `Ok(None)` if nothing has been stored under `key` yet.
    fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, BackendError>;
    fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), BackendError>;
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "gym-app-exercises")]
    Exercises,
    #[strum(serialize = "gym-app-plans")]
    Plans,
    #[strum(serialize = "gym-app-sessions")]
    WorkoutSessions,
    #[strum(serialize = "gym-app-log")]
    Log,
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("malformed data: {0}")]
    Malformed(String),
    #[error("{0}")]
    Unavailable(String),
}

impl From<BackendError> for domain::StorageError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unavailable(reason) => domain::StorageError::Unavailable(reason),
            err @ BackendError::Malformed(_) => domain::StorageError::Other(Box::new(err)),
        }
    }
}

/// The local storage of the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct Browser;

impl KeyValueStore for Browser {
    fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, BackendError> {
        match gloo_storage::LocalStorage::get(key.as_ref()) {
            Ok(value) => Ok(Some(value)),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(None),
                gloo_storage::errors::StorageError::SerdeError(err) => {
                    Err(BackendError::Malformed(err.to_string()))
                }
                err => Err(BackendError::Unavailable(err.to_string())),
            },
        }
    }

    fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), BackendError> {
        gloo_storage::LocalStorage::set(key.as_ref(), value)
            .map_err(|err| BackendError::Unavailable(err.to_string()))
    }
}

/// An in-process store for hosts without a browser.
#[derive(Debug, Default)]
pub struct Memory {
    documents: RefCell<BTreeMap<String, String>>,
}

impl Memory {
    /// Store raw text under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: Key, text: &str) {
        self.documents
            .borrow_mut()
            .insert(key.as_ref().to_string(), text.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: Key) -> Option<String> {
        self.documents.borrow().get(key.as_ref()).cloned()
    }
}

impl KeyValueStore for Memory {
    fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, BackendError> {
        self.documents
            .borrow()
            .get(key.as_ref())
            .map(|text| serde_json::from_str(text))
            .transpose()
            .map_err(|err| BackendError::Malformed(err.to_string()))
    }

    fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), BackendError> {
        let text =
            serde_json::to_string(value).map_err(|err| BackendError::Malformed(err.to_string()))?;
        self.documents
            .borrow_mut()
            .insert(key.as_ref().to_string(), text);
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, BackendError> {
        (*self).get(key)
    }

    fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), BackendError> {
        (*self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    pub mod data;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Key::Exercises, "gym-app-exercises")]
    #[case(Key::Plans, "gym-app-plans")]
    #[case(Key::WorkoutSessions, "gym-app-sessions")]
    #[case(Key::Log, "gym-app-log")]
    fn test_key_as_ref(#[case] key: Key, #[case] expected: &str) {
        assert_eq!(key.as_ref(), expected);
    }

    #[test]
    fn test_memory_get_missing() {
        assert_eq!(Memory::default().get::<Vec<u32>>(Key::Plans).unwrap(), None);
    }

    #[test]
    fn test_memory_set_get() {
        let memory = Memory::default();

        memory.set(Key::Plans, &vec![1, 2, 3]).unwrap();

        assert_eq!(memory.raw(Key::Plans), Some(String::from("[1,2,3]")));
        assert_eq!(
            memory.get::<Vec<u32>>(Key::Plans).unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_memory_get_malformed() {
        let memory = Memory::default();
        memory.insert_raw(Key::Plans, "{not json");

        assert!(matches!(
            memory.get::<Vec<u32>>(Key::Plans),
            Err(BackendError::Malformed(_))
        ));
    }

    #[test]
    fn test_storage_error_from_backend_error() {
        assert!(matches!(
            domain::StorageError::from(BackendError::Unavailable("quota exceeded".into())),
            domain::StorageError::Unavailable(reason) if reason == "quota exceeded"
        ));
        assert!(matches!(
            domain::StorageError::from(BackendError::Malformed("eof".into())),
            domain::StorageError::Other(_)
        ));
    }
}
