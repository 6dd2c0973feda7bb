//! The Reducer trait - core abstraction for business logic.
//!
//! Reducers are deterministic functions `(State, Action, Environment) → (State, Events)`.
//! Commands are validated and turned into events, events are applied to state
//! in place, and the emitted events are handed back to the caller so the
//! runtime can journal them and the shell can render them.

use smallvec::SmallVec;

/// The Reducer trait
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes (commands and events)
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for TheaterReducer {
///     type State = TheaterState;
///     type Action = TheaterAction;
///     type Environment = TheaterEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut TheaterState,
///         action: TheaterAction,
///         env: &TheaterEnvironment,
///     ) -> SmallVec<[TheaterAction; 4]> {
///         match action {
///             TheaterAction::ResetTheater => { /* ... */ }
///             _ => SmallVec::new(),
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and emitted events
    ///
    /// This function:
    /// 1. Validates the action
    /// 2. Updates state in place
    /// 3. Returns the events that describe what happened
    ///
    /// Replaying an event applies it to state and emits nothing.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Self::Action; 4]>;
}
