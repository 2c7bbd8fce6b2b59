//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from reducers.

/// Create an `Effect::Future` from an async block body
///
/// The body must evaluate to `Option<Action>`.
///
/// # Example
///
/// ```rust,ignore
/// use venue_core::async_effect;
///
/// async_effect! {
///     let venue = backend.venue(&id).await;
///     Some(VenueDetailsAction::VenueLoaded { venue })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` that dispatches an action after a duration
///
/// # Example
///
/// ```rust,ignore
/// use venue_core::delay;
///
/// delay! {
///     duration: Duration::from_millis(1000),
///     action: GalleryAction::TransitionFinished
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Create an `Effect::Delay` registered under a cancellation id
///
/// Scheduling a second timer under the same id cancels the first one.
///
/// # Example
///
/// ```rust,ignore
/// use venue_core::timer;
///
/// timer! {
///     id: AUTO_ADVANCE,
///     after: config.rotation_interval,
///     action: GalleryAction::Tick
/// }
/// ```
#[macro_export]
macro_rules! timer {
    (
        id: $id:expr,
        after: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($crate::delay! {
                duration: $duration,
                action: $action
            }),
        }
    };
}
