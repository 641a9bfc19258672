//! User notification boundary.
//!
//! The gateway and aggregator report every terminal outcome through a
//! [`Notifier`]; how a notice is rendered (toast, console line) is the
//! caller's concern.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Error,
}

pub trait Notifier {
    fn notify(&self, kind: NoticeKind, title: &str, detail: &str);
}

/// Renders notices as console lines; errors go to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, detail: &str) {
        match kind {
            NoticeKind::Info => println!("{title}: {detail}"),
            NoticeKind::Error => eprintln!("error: {title}: {detail}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;

    /// Records every notice for assertions.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub notices: RefCell<Vec<(NoticeKind, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, kind: NoticeKind, title: &str, _detail: &str) {
            self.notices.borrow_mut().push((kind, title.to_string()));
        }
    }
}
