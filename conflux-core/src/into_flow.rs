// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::stream_item::StreamItem;
use futures::Stream;

/// A trait for types that can be converted into a flow of [`StreamItem`]s.
///
/// Operators accept `IntoFlow` rather than a raw `Stream` so that channels
/// and other stream-like wrappers can be passed without explicit
/// conversion.
pub trait IntoFlow {
    /// The value type carried by the flow.
    type Item;
    /// The stream type this object converts into.
    type Flow: Stream<Item = StreamItem<Self::Item>>;

    /// Converts this object into a flow.
    fn into_flow(self) -> Self::Flow;
}

/// Blanket implementation for anything that is already a flow.
impl<S, T> IntoFlow for S
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = T;
    type Flow = S;

    fn into_flow(self) -> Self::Flow {
        self
    }
}
