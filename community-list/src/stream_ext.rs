use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    Stream, StreamExt,
    stream::{Fuse, FusedStream},
};

/// Combine two streams, emitting the latest value of both whenever either changes.
///
/// Nothing is emitted until both sides have produced a value. When several values are ready on a side at once, only the last of them is used.
///
/// Ends once both sides have ended, or once a side ends without ever having produced a value.
pub fn combine_latest<A, B>(a: A, b: B) -> CombineLatest<A, B>
where
    A: Stream,
    B: Stream,
{
    CombineLatest {
        a: a.fuse(),
        b: b.fuse(),
        latest_a: None,
        latest_b: None,
    }
}

/// Stream for [`combine_latest`].
#[must_use = "streams do nothing unless polled"]
pub struct CombineLatest<A: Stream, B: Stream> {
    a: Fuse<A>,
    b: Fuse<B>,
    latest_a: Option<A::Item>,
    latest_b: Option<B::Item>,
}

// The buffered items are never pinned.
impl<A, B> Unpin for CombineLatest<A, B>
where
    A: Stream + Unpin,
    B: Stream + Unpin,
{
}

/// Poll until pending or ended, keeping the last value. Returns true if anything new arrived.
fn drain_latest<S>(stream: &mut Fuse<S>, latest: &mut Option<S::Item>, cx: &mut Context<'_>) -> bool
where
    S: Stream + Unpin,
{
    let mut changed = false;
    while let Poll::Ready(Some(item)) = stream.poll_next_unpin(cx) {
        *latest = Some(item);
        changed = true;
    }
    changed
}

impl<A, B> Stream for CombineLatest<A, B>
where
    A: Stream + Unpin,
    B: Stream + Unpin,
    A::Item: Clone,
    B::Item: Clone,
{
    type Item = (A::Item, B::Item);

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        // Both sides must be polled every time, so both have a waker registered when returning Pending:
        let changed_a = drain_latest(&mut this.a, &mut this.latest_a, cx);
        let changed_b = drain_latest(&mut this.b, &mut this.latest_b, cx);

        if changed_a || changed_b {
            if let (Some(a), Some(b)) = (&this.latest_a, &this.latest_b) {
                return Poll::Ready(Some((a.clone(), b.clone())));
            }
        }

        let a_done = this.a.is_terminated();
        let b_done = this.b.is_terminated();
        if (a_done && b_done)
            || (a_done && this.latest_a.is_none())
            || (b_done && this.latest_b.is_none())
        {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}

/// Adds [`SwitchMapExt::switch_map`] to all streams.
pub trait SwitchMapExt: Stream + Sized {
    /// Map each item to an inner stream, only ever forwarding items of the most recent inner stream.
    ///
    /// A new outer item drops the previous inner stream, even if it hasn't finished,
    /// so results that arrive late for a superseded item are never delivered.
    fn switch_map<F, U>(self, f: F) -> SwitchMap<Self, F, U>
    where
        F: FnMut(Self::Item) -> U,
        U: Stream,
    {
        SwitchMap {
            outer: self.fuse(),
            f,
            inner: None,
        }
    }
}

impl<S: Stream> SwitchMapExt for S {}

/// Stream for [`SwitchMapExt::switch_map`].
#[must_use = "streams do nothing unless polled"]
pub struct SwitchMap<S: Stream, F, U> {
    outer: Fuse<S>,
    f: F,
    inner: Option<U>,
}

// Neither the mapper nor the outer items are ever pinned.
impl<S, F, U> Unpin for SwitchMap<S, F, U>
where
    S: Stream + Unpin,
    U: Unpin,
{
}

impl<S, F, U> Stream for SwitchMap<S, F, U>
where
    S: Stream + Unpin,
    F: FnMut(S::Item) -> U,
    U: Stream + Unpin,
{
    type Item = U::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        while let Poll::Ready(Some(item)) = this.outer.poll_next_unpin(cx) {
            // Replacing drops the superseded inner stream:
            this.inner = Some((this.f)(item));
        }

        if let Some(inner) = this.inner.as_mut() {
            match inner.poll_next_unpin(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => this.inner = None,
                Poll::Pending => return Poll::Pending,
            }
        }

        if this.outer.is_terminated() {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
