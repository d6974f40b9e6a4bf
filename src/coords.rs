// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinate streams: the evenly spaced real values along one axis of
//! the complex plane, one per pixel.
//!
//! Each value is computed from its index rather than by adding the
//! step over and over, so a stream of `num` values always has exactly
//! `num` values and the last one is always below `max`.

use crossbeam::channel::{bounded, Receiver};
use log::trace;
use std::thread;

/// A lazy, finite sequence of `num` values over `[min, max)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateStream {
    min: f64,
    step: f64,
    next: usize,
    num: usize,
}

impl CoordinateStream {
    /// Values start at `min` and are spaced by `(max - min) / num`.
    pub fn new(min: f64, max: f64, num: usize) -> Self {
        let step = if num == 0 {
            0.0
        } else {
            (max - min) / (num as f64)
        };
        CoordinateStream {
            min,
            step,
            next: 0,
            num,
        }
    }

    /// The `k`th value of the stream, whether or not it has been
    /// consumed yet.
    #[inline]
    pub fn at(&self, k: usize) -> f64 {
        self.min + (k as f64) * self.step
    }

    /// Distance between consecutive values.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Run the stream on its own thread, handing each value over a
    /// rendezvous channel.  The producer cannot run ahead of the
    /// consumer, and the channel closes after the last value.  If the
    /// receiver is dropped early the producer simply stops.
    pub fn spawn(self) -> Receiver<f64> {
        let (tx, rx) = bounded(0);
        thread::spawn(move || {
            let mut sent = 0;
            for value in self {
                if tx.send(value).is_err() {
                    break;
                }
                sent += 1;
            }
            trace!("coordinate stream closed after {} values", sent);
        });
        rx
    }
}

impl Iterator for CoordinateStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.num {
            return None;
        }
        let value = self.at(self.next);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.num - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for CoordinateStream {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarters_of_the_unit_interval() {
        let values: Vec<f64> = CoordinateStream::new(0.0, 1.0, 4).collect();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn length_is_exact_where_accumulation_drifts() {
        // Adding 0.1 ten times lands just below 1.0, which would sneak
        // an eleventh value in.
        let stream = CoordinateStream::new(0.0, 1.0, 10);
        assert_eq!(stream.len(), 10);
        let values: Vec<f64> = stream.collect();
        assert_eq!(values.len(), 10);
        assert!(*values.last().unwrap() < 1.0);
    }

    #[test]
    fn values_strictly_increase_and_stay_below_max() {
        let values: Vec<f64> = CoordinateStream::new(-2.0, 0.5, 1000).collect();
        assert_eq!(values.len(), 1000);
        assert_eq!(values[0], -2.0);
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(values[999] < 0.5);
    }

    #[test]
    fn at_matches_iteration() {
        let stream = CoordinateStream::new(-1.25, 1.25, 333);
        for (k, value) in stream.enumerate() {
            assert_eq!(stream.at(k), value);
        }
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert_eq!(CoordinateStream::new(0.0, 1.0, 0).count(), 0);
    }

    #[test]
    fn spawned_stream_delivers_every_value_in_order() {
        let expected: Vec<f64> = CoordinateStream::new(-1.0, 1.0, 50).collect();
        let received: Vec<f64> = CoordinateStream::new(-1.0, 1.0, 50).spawn().iter().collect();
        assert_eq!(received, expected);
    }

    #[test]
    fn spawned_stream_stops_when_receiver_goes_away() {
        let rx = CoordinateStream::new(0.0, 1.0, 1_000_000).spawn();
        assert_eq!(rx.recv(), Ok(0.0));
        drop(rx);
    }
}
