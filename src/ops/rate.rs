//! Rate limiting combinators
use async_stream::stream;
use std::time::Duration;
use tokio::time::Instant;

use crate::cursor::{Cursor, Step};
use crate::source::IntoSource;

/// Throttle a sequence to one element per window.
///
/// The first element opens a window and is yielded immediately. Elements arriving
/// less than `duration` after the window opened are withheld; only the most recent
/// withheld element is remembered. The next element arriving after the window has
/// elapsed opens a new window (discarding anything withheld). When the source
/// ends, a still-withheld element is yielded once.
///
/// Windows are measured by reading the clock when elements arrive; no timer is
/// scheduled. A zero `duration` lets every element through.
pub fn throttle<S>(duration: Duration, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        let mut window_start: Option<Instant> = None;
        let mut withheld = None;

        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    let now = Instant::now();
                    let opens_window = window_start
                        .map_or(true, |start| now.duration_since(start) >= duration);

                    if opens_window {
                        window_start = Some(now);
                        withheld = None;
                        yield Ok(Step::Yield(item));
                    } else {
                        withheld = Some(item);
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }

        if let Some(item) = withheld {
            yield Ok(Step::Yield(item));
        }
        yield Ok(Step::Done(()));
    })
}
