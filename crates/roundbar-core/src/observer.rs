use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::{Dispose, PxSize};

new_key_type! {
    pub struct ListenerKey;
}

type Listener = Box<dyn FnOnce(PxSize)>;

#[derive(Default)]
struct ObserverInner {
    listeners: SlotMap<ListenerKey, Listener>,
    dispatches: u64,
}

/// Per-node "layout measured" notifications.
///
/// Listeners are single-fire: `dispatch` detaches every registered listener
/// before calling it, so a listener never observes a second layout pass unless
/// it registers again.
#[derive(Clone, Default)]
pub struct LayoutObserver {
    inner: Rc<RefCell<ObserverInner>>,
}

impl LayoutObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` for the next dispatch. Running the returned `Dispose`
    /// before that cancels the registration; after it, it does nothing.
    pub fn once(&self, f: impl FnOnce(PxSize) + 'static) -> Dispose {
        let key = self.inner.borrow_mut().listeners.insert(Box::new(f));
        let weak = Rc::downgrade(&self.inner);
        Dispose::new(move || {
            if let Some(inner) = weak.upgrade()
                && inner.borrow_mut().listeners.remove(key).is_some()
            {
                log::trace!("layout observer: listener {key:?} cancelled before firing");
            }
        })
    }

    /// Delivers `size` to every pending listener and returns how many fired.
    pub fn dispatch(&self, size: PxSize) -> usize {
        let fired: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatches += 1;
            inner.listeners.drain().map(|(_, f)| f).collect()
        };
        if !fired.is_empty() {
            log::trace!(
                "layout observer: {}x{} to {} listener(s)",
                size.width,
                size.height,
                fired.len()
            );
        }
        let n = fired.len();
        for f in fired {
            f(size);
        }
        n
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of layout passes seen so far, whether or not anyone listened.
    pub fn dispatch_count(&self) -> u64 {
        self.inner.borrow().dispatches
    }
}

impl std::fmt::Debug for LayoutObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutObserver")
            .field("listeners", &self.listener_count())
            .field("dispatches", &self.dispatch_count())
            .finish()
    }
}
