use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::window;

/// Runs `callback` once the window has stopped resizing for `delay_ms`.
///
/// Charts render into a fixed-size surface, so redrawing on every resize
/// event would repaint dozens of times while the user drags the window edge.
/// The returned listener must be kept alive for the component lifetime;
/// dropping it detaches the handler along with any pending timeout.
pub fn on_resize_settled<F>(callback: F, delay_ms: u32) -> EventListener
where
    F: Fn() + 'static,
{
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let callback = Rc::new(callback);

    EventListener::new(&window().unwrap(), "resize", move |_| {
        // A fresh event supersedes whatever was scheduled
        if let Some(handle) = pending.borrow_mut().take() {
            drop(handle);
        }

        let cb = callback.clone();
        *pending.borrow_mut() = Some(Timeout::new(delay_ms, move || cb()));
    })
}
