// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// A contributed value, either given directly or produced on demand.
///
/// Factories are invoked exactly once, when the surface is composed.
pub enum Contribution<T> {
    Literal(T),
    Factory(Box<dyn Fn() -> T + Send + Sync>),
}

impl<T> Contribution<T> {
    pub fn factory(f: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Contribution::Factory(Box::new(f))
    }

    pub fn resolve(self) -> T {
        match self {
            Contribution::Literal(value) => value,
            Contribution::Factory(f) => f(),
        }
    }
}

impl<T> From<T> for Contribution<T> {
    fn from(value: T) -> Self {
        Contribution::Literal(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn literals_and_factories() {
        assert_eq!(Contribution::from("type A { a: Int }").resolve(), "type A { a: Int }");

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let contribution = Contribution::factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "type B { b: Int }".to_string()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(contribution.resolve(), "type B { b: Int }");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
