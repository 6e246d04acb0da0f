// Copyright 2025 conflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ConfluxError;

/// A flow element that is either a value or an error.
///
/// Every conflux flow is a `Stream` of `StreamItem<T>`. Errors travel
/// through the same channel as values, so any operator in a chain can
/// propagate a failure downstream without a side channel; an `Error` item
/// terminates the stage that observes it.
#[derive(Debug)]
pub enum StreamItem<T> {
    /// A successfully produced value
    Value(T),
    /// A terminal error propagating through the flow
    Error(ConfluxError),
}

impl<T> StreamItem<T> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, StreamItem::Value(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, StreamItem::Error(_))
    }

    /// Converts to `Option<T>`, discarding an error.
    pub fn ok(self) -> Option<T> {
        match self {
            StreamItem::Value(value) => Some(value),
            StreamItem::Error(_) => None,
        }
    }

    /// Converts to `Option<ConfluxError>`, discarding a value.
    pub fn err(self) -> Option<ConfluxError> {
        match self {
            StreamItem::Value(_) => None,
            StreamItem::Error(err) => Some(err),
        }
    }

    /// Applies a function to a contained value; errors pass through
    /// unchanged.
    pub fn map<U, F>(self, f: F) -> StreamItem<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            StreamItem::Value(value) => StreamItem::Value(f(value)),
            StreamItem::Error(err) => StreamItem::Error(err),
        }
    }

    /// Applies a fallible function to a contained value; errors pass
    /// through unchanged.
    pub fn and_then<U, F>(self, f: F) -> StreamItem<U>
    where
        F: FnOnce(T) -> StreamItem<U>,
    {
        match self {
            StreamItem::Value(value) => f(value),
            StreamItem::Error(err) => StreamItem::Error(err),
        }
    }

    /// Returns the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the item is an `Error`.
    pub fn unwrap(self) -> T {
        match self {
            StreamItem::Value(value) => value,
            StreamItem::Error(err) => {
                panic!("called `StreamItem::unwrap()` on an `Error` item: {err:?}")
            }
        }
    }

    /// Returns the contained value, panicking with `msg` if the item is an
    /// `Error`.
    ///
    /// # Panics
    ///
    /// Panics with the provided message if the item is an `Error`.
    pub fn expect(self, msg: &str) -> T {
        match self {
            StreamItem::Value(value) => value,
            StreamItem::Error(err) => panic!("{msg}: {err:?}"),
        }
    }
}

impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StreamItem::Value(a), StreamItem::Value(b)) => a == b,
            // Errors never compare equal
            _ => false,
        }
    }
}

impl<T> From<Result<T, ConfluxError>> for StreamItem<T> {
    fn from(result: Result<T, ConfluxError>) -> Self {
        match result {
            Ok(value) => StreamItem::Value(value),
            Err(err) => StreamItem::Error(err),
        }
    }
}

impl<T> From<StreamItem<T>> for Result<T, ConfluxError> {
    fn from(item: StreamItem<T>) -> Self {
        match item {
            StreamItem::Value(value) => Ok(value),
            StreamItem::Error(err) => Err(err),
        }
    }
}
