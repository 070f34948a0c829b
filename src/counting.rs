//! Counting sorts for 1- and 2-byte integer keys.
//!
//! One pass tallies a histogram, one pass re-emits the keys in ascending
//! order. Emission direction adapts to density: a region larger than half the
//! key domain walks every slot forward (prefetcher-friendly); a sparse region
//! skips the empty slots. Signed keys are biased into unsigned slot space so
//! the slot order coincides with the numeric order.

use cuneiform::cuneiform;

const NUM_BYTE_VALUES: usize = 1 << 8;
const NUM_SHORT_VALUES: usize = 1 << 16;

// Cache-aligned counts struct.
#[cuneiform]
struct ByteHistogram {
    data: [usize; NUM_BYTE_VALUES],
}

pub(crate) fn counting_sort_u8(v: &mut [u8], low: usize, high: usize) {
    let mut hist = ByteHistogram {
        data: [0; NUM_BYTE_VALUES],
    };
    let counts = &mut hist.data;

    for &x in &v[low..high] {
        counts[x as usize] += 1;
    }

    emit(&mut v[low..high], counts, |slot| slot as u8);
}

pub(crate) fn counting_sort_i8(v: &mut [i8], low: usize, high: usize) {
    let mut hist = ByteHistogram {
        data: [0; NUM_BYTE_VALUES],
    };
    let counts = &mut hist.data;

    // Bias by the type minimum so slot order matches numeric order.
    for &x in &v[low..high] {
        counts[(x as u8).wrapping_add(128) as usize] += 1;
    }

    emit(&mut v[low..high], counts, |slot| {
        (slot as u8).wrapping_sub(128) as i8
    });
}

pub(crate) fn counting_sort_u16(v: &mut [u16], low: usize, high: usize) {
    let mut counts = vec![0usize; NUM_SHORT_VALUES];

    for &x in &v[low..high] {
        counts[x as usize] += 1;
    }

    emit(&mut v[low..high], &counts, |slot| slot as u16);
}

pub(crate) fn counting_sort_i16(v: &mut [i16], low: usize, high: usize) {
    let mut counts = vec![0usize; NUM_SHORT_VALUES];

    for &x in &v[low..high] {
        counts[(x as u16).wrapping_add(32768) as usize] += 1;
    }

    emit(&mut v[low..high], &counts, |slot| {
        (slot as u16).wrapping_sub(32768) as i16
    });
}

/// Rewrites `out` in ascending slot order from the histogram.
fn emit<T: Copy>(out: &mut [T], counts: &[usize], key_of: impl Fn(usize) -> T) {
    let dense = out.len() > counts.len() / 2;
    let mut i = 0;

    if dense {
        for (slot, &count) in counts.iter().enumerate() {
            let key = key_of(slot);
            for _ in 0..count {
                out[i] = key;
                i += 1;
            }
        }
    } else {
        for (slot, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let key = key_of(slot);
            out[i..i + count].fill(key);
            i += count;
        }
    }
}
