//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   Pierre Avital, <pierre.avital@me.com>
//

//! Precondition failures.
//!
//! Reading an empty [`Optional`](crate::Optional), `get`-ing the wrong candidate of a
//! [`Variant`](crate::Variant), extracting the wrong arm of a [`Result`](crate::Result) or calling
//! an unbound [`Delegate`](crate::Delegate) are programming errors. They are reported here:
//! the installed [`Handler`] is told first, then the thread panics.
//!
//! With the `std` feature, the panic payload is the [`Failure`] itself, so it can be caught with
//! `std::panic::catch_unwind` and downcast. With the `checks` feature disabled, the handler is
//! skipped and the panic carries only the condition's name.

use core::panic::Location;
use core::sync::atomic::{AtomicPtr, Ordering};

/// The precondition that was violated.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// The value of an empty optional was accessed.
    OptionalInvalid,
    /// A variant was accessed as a candidate that isn't its active one.
    VariantIncorrectType,
    /// A valueless variant was visited or accessed.
    VariantValueless,
    /// The arm of a result that isn't currently held was accessed.
    ResultWrongArm,
    /// A delegate with nothing bound to it was called.
    DelegateUninitialised,
}
impl Condition {
    /// The condition's stable name, such as `"optional:invalid"`.
    pub const fn name(self) -> &'static str {
        match self {
            Condition::OptionalInvalid => "optional:invalid",
            Condition::VariantIncorrectType => "variant:incorrect type",
            Condition::VariantValueless => "variant:valueless",
            Condition::ResultWrongArm => "result:wrong arm",
            Condition::DelegateUninitialised => "delegate:uninitialised",
        }
    }
}
impl core::fmt::Display for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A violated precondition, and where it was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure {
    condition: Condition,
    location: &'static Location<'static>,
}
impl Failure {
    pub const fn new(condition: Condition, location: &'static Location<'static>) -> Self {
        Self {
            condition,
            location,
        }
    }
    /// Constructs a failure located at the caller.
    #[track_caller]
    pub fn here(condition: Condition) -> Self {
        Self::new(condition, Location::caller())
    }
    pub const fn condition(&self) -> Condition {
        self.condition
    }
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }
}
impl core::fmt::Display for Failure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} ({}:{})",
            self.condition,
            self.location.file(),
            self.location.line()
        )
    }
}
#[cfg(feature = "std")]
impl std::error::Error for Failure {}

/// A process-wide observer of raised failures.
pub type Handler = fn(&Failure);

static HANDLER: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

/// Installs `handler`, which will be told about every failure raised from now on.
///
/// Returns the previously installed handler, if any.
pub fn set_handler(handler: Handler) -> Option<Handler> {
    let previous = HANDLER.swap(handler as *mut (), Ordering::AcqRel);
    unsafe { handler_from_ptr(previous) }
}
/// Uninstalls the current handler and returns it.
pub fn take_handler() -> Option<Handler> {
    let previous = HANDLER.swap(core::ptr::null_mut(), Ordering::AcqRel);
    unsafe { handler_from_ptr(previous) }
}
/// # Safety
/// `ptr` must be null or have been obtained from a [`Handler`].
unsafe fn handler_from_ptr(ptr: *mut ()) -> Option<Handler> {
    if ptr.is_null() {
        None
    } else {
        Some(core::mem::transmute::<*mut (), Handler>(ptr))
    }
}

/// Tells the installed handler, and `tracing` if enabled, about `failure`.
pub fn report(failure: &Failure) {
    #[cfg(feature = "tracing")]
    tracing::error!(
        condition = failure.condition.name(),
        file = failure.location.file(),
        line = failure.location.line(),
        "tagcell precondition violated"
    );
    if let Some(handler) = unsafe { handler_from_ptr(HANDLER.load(Ordering::Acquire)) } {
        handler(failure)
    }
}

/// Raises `condition` at the caller's location.
///
/// # Panics
/// Always.
#[cold]
#[track_caller]
pub fn raise(condition: Condition) -> ! {
    #[cfg(feature = "checks")]
    {
        let failure = Failure::here(condition);
        report(&failure);
        #[cfg(feature = "std")]
        std::panic::panic_any(failure);
        #[cfg(not(feature = "std"))]
        panic!("{failure}");
    }
    #[cfg(not(feature = "checks"))]
    panic!("{}", condition.name())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    static SEEN: AtomicUsize = AtomicUsize::new(0);
    fn count(failure: &Failure) {
        if failure.condition() == Condition::VariantValueless {
            SEEN.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn names() {
        assert_eq!(Condition::OptionalInvalid.name(), "optional:invalid");
        assert_eq!(Condition::DelegateUninitialised.to_string(), "delegate:uninitialised");
        let failure = Failure::here(Condition::ResultWrongArm);
        assert!(failure.to_string().starts_with("result:wrong arm ("));
        assert_eq!(failure.location().file(), file!());
    }

    #[cfg(feature = "checks")]
    #[test]
    fn raised_failures_reach_the_handler_and_unwind_with_their_payload() {
        let previous = set_handler(count);
        let line = line!() + 1;
        let payload = std::panic::catch_unwind(|| raise(Condition::VariantValueless)).unwrap_err();
        let failure = payload.downcast::<Failure>().unwrap();
        assert_eq!(failure.condition(), Condition::VariantValueless);
        assert_eq!(failure.location().line(), line);
        assert!(SEEN.load(Ordering::SeqCst) >= 1);
        assert!(take_handler().is_some());
        if let Some(previous) = previous {
            set_handler(previous);
        }
    }

    #[cfg(not(feature = "checks"))]
    #[test]
    fn unchecked_failures_skip_the_handler_and_carry_only_the_name() {
        let previous = set_handler(count);
        let payload = std::panic::catch_unwind(|| raise(Condition::VariantValueless)).unwrap_err();
        assert_eq!(SEEN.load(Ordering::SeqCst), 0);
        assert!(!payload.is::<Failure>());
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&'static str>().copied());
        assert_eq!(message, Some("variant:valueless"));
        take_handler();
        if let Some(previous) = previous {
            set_handler(previous);
        }
    }

    #[cfg(all(feature = "checks", feature = "tracing"))]
    mod events {
        use super::*;
        use std::sync::{Arc, Mutex};
        use tracing::field::{Field, Visit};
        use tracing_subscriber::layer::{Context, SubscriberExt};
        use tracing_subscriber::Layer;

        #[derive(Debug, Default, PartialEq)]
        struct Recorded {
            condition: Option<String>,
            file: Option<String>,
            line: Option<u64>,
        }
        impl Visit for Recorded {
            fn record_str(&mut self, field: &Field, value: &str) {
                match field.name() {
                    "condition" => self.condition = Some(value.to_owned()),
                    "file" => self.file = Some(value.to_owned()),
                    _ => {}
                }
            }
            fn record_u64(&mut self, field: &Field, value: u64) {
                if field.name() == "line" {
                    self.line = Some(value)
                }
            }
            fn record_debug(&mut self, _: &Field, _: &dyn core::fmt::Debug) {}
        }

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<(tracing::Level, Recorded)>>>);
        impl<S: tracing::Subscriber> Layer<S> for Capture {
            fn on_event(&self, event: &tracing::Event<'_>, _: Context<'_, S>) {
                let mut recorded = Recorded::default();
                event.record(&mut recorded);
                self.0
                    .lock()
                    .unwrap()
                    .push((*event.metadata().level(), recorded));
            }
        }

        #[test]
        fn raised_failures_are_traced() {
            let capture = Capture::default();
            let subscriber = tracing_subscriber::Registry::default().with(capture.clone());
            let line = line!() + 3;
            tracing::subscriber::with_default(subscriber, || {
                std::panic::catch_unwind(|| {
                    raise(Condition::ResultWrongArm)
                })
                .unwrap_err();
            });
            let events = capture.0.lock().unwrap();
            assert_eq!(
                events.as_slice(),
                &[(
                    tracing::Level::ERROR,
                    Recorded {
                        condition: Some("result:wrong arm".into()),
                        file: Some(file!().into()),
                        line: Some(line.into()),
                    }
                )]
            );
        }
    }
}
