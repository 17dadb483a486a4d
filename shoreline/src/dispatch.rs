//! Fork-join dispatch of point-wise batch work.

use crate::error::ShorelineError;

/// Runs `op` once per slot of `output`, optionally fanning the work out over
/// worker threads.
///
/// The slot range `[0, len)` is split into one contiguous chunk per worker
/// (sizes differ by at most one); every index is processed exactly once and
/// each worker writes only to its own chunk, so no synchronization is needed
/// on the output.
///
/// `num_threads == 0` means "use all available hardware threads";
/// `num_threads == 1` runs inline on the caller's thread. A failing slot stops
/// its own worker only; sibling workers run to completion, and the last
/// captured failure is returned after all of them have joined, even though
/// slots of unaffected chunks were written.
pub fn dispatch<T, F>(output: &mut [T], num_threads: usize, op: F) -> Result<(), ShorelineError>
where
    T: Send,
    F: Fn(usize, &mut T) -> Result<(), ShorelineError> + Sync,
{
    let len = output.len();
    let workers = effective_workers(num_threads, len);

    if workers <= 1 {
        for (ix, slot) in output.iter_mut().enumerate() {
            op(ix, slot)?;
        }
        return Ok(());
    }

    let chunk = len / workers;
    let extra = len % workers;
    let mut failure = None;

    std::thread::scope(|scope| {
        let op = &op;
        let mut handles = Vec::with_capacity(workers);
        let mut rest = output;
        let mut start = 0;

        for wx in 0..workers {
            let size = chunk + usize::from(wx < extra);
            let (head, tail) = rest.split_at_mut(size);
            rest = tail;

            handles.push(scope.spawn(move || {
                for (offset, slot) in head.iter_mut().enumerate() {
                    op(start + offset, slot)?;
                }
                Ok(())
            }));
            start += size;
        }

        for handle in handles {
            let result: Result<(), ShorelineError> = handle.join().unwrap_or_else(|_| {
                Err(ShorelineError::Computation(
                    "worker thread panicked".into(),
                ))
            });
            if let Err(err) = result {
                failure = Some(err);
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn effective_workers(num_threads: usize, len: usize) -> usize {
    let requested = if num_threads == 0 {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
    } else {
        num_threads
    };
    requested.min(len).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_is_processed_exactly_once() {
        for num_threads in [0, 1, 3, 4, 7] {
            let mut output = vec![0usize; 100];
            dispatch(&mut output, num_threads, |ix, slot| {
                *slot += ix + 1;
                Ok(())
            })
            .expect("no failures");

            for (ix, value) in output.iter().enumerate() {
                assert_eq!(*value, ix + 1, "index {ix} with {num_threads} thread(s)");
            }
        }
    }

    #[test]
    fn more_workers_than_slots() {
        let mut output = vec![0usize; 2];
        dispatch(&mut output, 16, |ix, slot| {
            *slot = ix;
            Ok(())
        })
        .expect("no failures");
        assert_eq!(output, vec![0, 1]);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut output: Vec<u8> = Vec::new();
        assert!(dispatch(&mut output, 4, |_, _| Ok(())).is_ok());
    }

    #[test]
    fn failure_is_captured_while_siblings_finish() {
        let mut output = vec![0i64; 40];
        let result = dispatch(&mut output, 4, |ix, slot| {
            if ix == 3 {
                return Err(ShorelineError::Computation("slot 3 failed".into()));
            }
            *slot = ix as i64;
            Ok(())
        });

        assert!(matches!(result, Err(ShorelineError::Computation(_))));
        // Chunks other than the failing first one ran to completion.
        assert_eq!(output[39], 39);
        assert_eq!(output[20], 20);
    }
}
