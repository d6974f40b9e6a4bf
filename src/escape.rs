// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test.

use num::Complex;

/// This is our classic iterator function.  Starting from `z = c`, it
/// repeats `z = z * z + c` and returns one more than the iteration at
/// which `z` left the circle of radius 2, or `max_count` if it never
/// did.  The result is always in `1..=max_count`.
#[inline]
pub fn escape_time(c: Complex<f64>, max_count: u32) -> u32 {
    let mut z = c;
    for i in 0..max_count {
        if z.norm_sqr() > 4.0 {
            return i + 1;
        }
        z = z * z + c;
    }
    max_count
}
