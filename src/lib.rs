//! rs2-seq - composable operators over asynchronous pull-based sequences
//!
//! A sequence hands out [`Cursor`]s; advancing a cursor yields [`Step`]s until a
//! terminal. Operators in [`ops`] take their configuration first and a source
//! sequence last, and return a new cursor or an eventual result. A [`Subject`]
//! bridges push-based producers into this pull-based world by buffering values
//! for every attached consumer. The [`pipe`] module offers every operator in
//! partially applied form.
//!
//! ```
//! use rs2_seq::*;
//!
//! # async fn example() -> SeqResult<()> {
//! let subject = Subject::new();
//! let evens = filter(|x: &i32| x % 2 == 0, subject.clone());
//!
//! for x in 1..=6 {
//!     subject.push(x)?;
//! }
//! subject.complete()?;
//!
//! assert_eq!(to_vec(evens).await?, vec![2, 4, 6]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod ops;
pub mod pipe;
pub mod source;
pub mod subject;

pub use config::{SubjectConfig, MAX_INITIAL_QUEUE_CAPACITY};
pub use cursor::{Advance, Cursor, Step};
pub use error::{SeqError, SeqResult};
pub use ops::*;
pub use source::{
    empty, fail, from_future, from_iter, from_stream, from_try_future, from_try_stream, once,
    IntoSource, Source,
};
pub use subject::{Subject, SubjectCursor, SubjectStats};
