//! Custom hooks for the VaporCycle UI.

use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// Returns a time-delayed view of `value`: the output only takes on a new
/// value once the input has stopped changing (by `PartialEq`) for
/// `delay_ms` milliseconds.
///
/// Every change cancels the pending commit and schedules a new one, so at
/// most one settle fires per quiet period and superseded values are never
/// applied. The pending timer is released on teardown through the effect
/// destructor (`Timeout` cancels on drop). A delay of 0 keeps the same
/// cancel-and-reschedule semantics, collapsing to the next tick.
#[hook]
pub fn use_debounced<T>(value: T, delay_ms: u32) -> T
where
    T: Clone + PartialEq + 'static,
{
    let debounced = use_state(|| value.clone());

    {
        let debounced = debounced.clone();
        use_effect_with((value, delay_ms), move |(value, delay_ms)| {
            let value = value.clone();
            let timer = Timeout::new(*delay_ms, move || debounced.set(value));
            move || drop(timer)
        });
    }

    (*debounced).clone()
}
