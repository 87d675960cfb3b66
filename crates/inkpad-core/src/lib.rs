//! Inkpad Core Library
//!
//! State engine for a freehand-drawing canvas: camera transform, shape
//! model, stroke and eraser gesture state machines, transactional
//! undo/redo, and a synchronization bridge to a remote document store.

pub mod camera;
pub mod engine;
pub mod history;
pub mod hit;
pub mod shapes;
pub mod state;
pub mod store;
pub mod sync;

pub use camera::Camera;
pub use engine::{Engine, SubscriberId};
pub use hit::{HitTester, StrokeGeometry};
pub use shapes::{Freeform, PressuredPoint, SerializableColor, Shape, ShapeId};
pub use state::{Action, App, Content, Meta, MetaPatch, Status, Theme, ThemePatch};
pub use store::{MemoryStore, RemoteStore, StoreError, StoreResult, StoredDocument};
pub use sync::{Session, SyncBridge, document_name};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;

#[cfg(test)]
pub(crate) mod test_util {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    /// Simple blocking executor for async tests.
    pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }
}
