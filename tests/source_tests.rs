use futures_util::stream;
use rs2_seq::*;

#[tokio::test]
async fn test_from_future() {
    let mut cursor = from_future(async { 5 });
    assert_eq!(cursor.advance().await, Ok(Step::Yield(5)));
    assert_eq!(cursor.advance().await, Ok(Step::Done(())));
}

#[tokio::test]
async fn test_from_try_future_error() {
    let mut cursor = from_try_future::<i32, _>(async { Err(SeqError::custom("rejected")) });
    assert_eq!(cursor.advance().await, Err(SeqError::custom("rejected")));
    assert_eq!(cursor.advance().await, Err(SeqError::Exhausted));
}

#[tokio::test]
async fn test_from_stream() {
    let cursor = from_stream(stream::iter(vec![1, 2, 3]));
    assert_eq!(to_vec(cursor).await, Ok(vec![1, 2, 3]));
}

#[tokio::test]
async fn test_from_try_stream_stops_at_first_error() {
    let items = vec![Ok(1), Err(SeqError::custom("bad")), Ok(3)];
    let mut cursor = from_try_stream(stream::iter(items));

    assert_eq!(cursor.advance().await, Ok(Step::Yield(1)));
    assert_eq!(cursor.advance().await, Err(SeqError::custom("bad")));
    assert_eq!(cursor.advance().await, Err(SeqError::Exhausted));
}

#[tokio::test]
async fn test_once_empty_fail() {
    assert_eq!(to_vec(once("only")).await, Ok(vec!["only"]));
    assert_eq!(to_vec(empty::<u8>()).await, Ok(vec![]));
    assert_eq!(
        to_vec(fail::<u8>(SeqError::Io("closed".into()))).await,
        Err(SeqError::Io("closed".into()))
    );
}

#[tokio::test]
async fn test_from_iter_is_lazy_and_ordered() {
    assert_eq!(to_vec(from_iter(1..=4)).await, Ok(vec![1, 2, 3, 4]));
    assert_eq!(to_vec(from_iter("abc".chars())).await, Ok(vec!['a', 'b', 'c']));
}

#[tokio::test]
async fn test_vec_source_is_shared() {
    let mut source = vec![1, 2].into_source();
    assert!(source.is_shared());

    let first = source.cursor();
    let second = source.cursor();
    assert_eq!(to_vec(first).await, Ok(vec![1, 2]));
    assert_eq!(to_vec(second).await, Ok(vec![1, 2]));
}

#[tokio::test]
async fn test_single_source_hands_out_one_cursor() {
    let mut source = from_iter(vec![1, 2]).into_source();
    assert!(!source.is_shared());

    let first = source.cursor();
    let mut second = source.cursor();
    assert_eq!(to_vec(first).await, Ok(vec![1, 2]));
    assert_eq!(second.advance().await, Err(SeqError::Exhausted));
}

#[tokio::test]
async fn test_custom_shared_source() {
    let mut source = Source::shared(|| from_iter(0..3));
    assert_eq!(to_vec(source.cursor()).await, Ok(vec![0, 1, 2]));
    assert_eq!(to_vec(source.cursor()).await, Ok(vec![0, 1, 2]));
    assert_eq!(format!("{:?}", source), "Source::Shared");
}

#[tokio::test]
async fn test_subject_source_attaches_per_cursor() {
    let subject = Subject::new();
    let mut source = subject.clone().into_source();
    assert!(source.is_shared());

    let early = source.cursor();
    subject.push('a').unwrap();
    let late = source.cursor();
    subject.push('b').unwrap();
    subject.complete().unwrap();

    assert_eq!(to_vec(early).await, Ok(vec!['a', 'b']));
    assert_eq!(to_vec(late).await, Ok(vec!['b']));
}

#[tokio::test]
async fn test_subject_cursor_is_a_single_source() {
    let subject = Subject::new();
    let cursor = subject.attach();
    let mut source = cursor.into_source();
    assert!(!source.is_shared());

    subject.push(1).unwrap();
    subject.complete().unwrap();
    assert_eq!(to_vec(source.cursor()).await, Ok(vec![1]));
}
