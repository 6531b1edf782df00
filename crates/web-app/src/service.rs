use std::collections::VecDeque;

use crate::log;

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.repository.read_entries()
    }

    fn add_log_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        self.repository.write_entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use crate::log::Service as _;

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        entries: Mutex<VecDeque<log::Entry>>,
    }

    impl log::Repository for FakeRepository {
        fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
            self.entries
                .lock()
                .map(|entries| entries.clone())
                .map_err(|err| log::Error::Unknown(err.to_string()))
        }

        fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
            let mut entries = self
                .entries
                .lock()
                .map_err(|err| log::Error::Unknown(err.to_string()))?;
            log::prepend(&mut entries, entry);
            Ok(())
        }
    }

    #[test]
    fn test_log_entries() {
        let service = Service::new(FakeRepository::default());
        let first = log::Entry::new(::log::Level::Info, String::from("first"));
        let second = log::Entry::new(::log::Level::Error, String::from("second"));

        service.add_log_entry(first.clone()).unwrap();
        service.add_log_entry(second.clone()).unwrap();

        assert_eq!(
            service.get_log_entries().unwrap(),
            VecDeque::from([second, first])
        );
    }
}
