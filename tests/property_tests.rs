use quickcheck::{quickcheck, TestResult};
use rs2_seq::*;
use tokio::runtime::Runtime;

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    Runtime::new().unwrap().block_on(fut)
}

#[test]
fn property_fold_matches_iterator_sum() {
    fn prop(input: Vec<i32>) -> bool {
        let expected: i64 = input.iter().map(|x| *x as i64).sum();
        let total = block_on(fold(0i64, |acc, x: i32| acc + x as i64, input));
        total == Ok(expected)
    }
    quickcheck(prop as fn(Vec<i32>) -> bool);
}

#[test]
fn property_scan_ends_with_fold() {
    fn prop(input: Vec<i32>) -> bool {
        block_on(async {
            let step = |acc: i64, x: i32| acc + x as i64;

            let mut running = scan(0i64, step, input.clone());
            let mut last_yielded = 0i64;
            let final_acc = loop {
                match running.advance().await {
                    Ok(Step::Yield(acc)) => last_yielded = acc,
                    Ok(Step::Done(acc)) => break acc,
                    Err(_) => return false,
                }
            };

            let folded = fold(0i64, step, input.clone()).await;
            let last_matches = input.is_empty() || last_yielded == final_acc;
            last_matches && folded == Ok(final_acc)
        })
    }
    quickcheck(prop as fn(Vec<i32>) -> bool);
}

#[test]
fn property_take_yields_min_of_n_and_len() {
    fn prop(input: Vec<u8>, n: u8) -> bool {
        let n = n as usize;
        let taken = block_on(to_vec(take(n, input.clone())));
        taken == Ok(input.into_iter().take(n).collect())
    }
    quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn property_zip_length_is_shorter_side() {
    fn prop(left: Vec<u16>, right: Vec<char>) -> bool {
        let expected_end = if left.len() <= right.len() {
            ZipEnd::Left
        } else {
            ZipEnd::Right
        };
        let expected: Vec<(u16, char)> = left.iter().copied().zip(right.iter().copied()).collect();

        block_on(async {
            let mut zipped = zip(left, right);
            let mut pairs = Vec::new();
            loop {
                match zipped.advance().await {
                    Ok(Step::Yield(pair)) => pairs.push(pair),
                    Ok(Step::Done(end)) => return pairs == expected && end == expected_end,
                    Err(_) => return false,
                }
            }
        })
    }
    quickcheck(prop as fn(Vec<u16>, Vec<char>) -> bool);
}

#[test]
fn property_partition_splits_without_loss() {
    fn prop(input: Vec<i16>) -> TestResult {
        if input.len() > 500 {
            return TestResult::discard();
        }

        let split = block_on(partition(|x: &i16| *x >= 0, input.clone()));
        let (matched, rest) = match split {
            Ok(split) => split,
            Err(_) => return TestResult::failed(),
        };

        let expected_matched: Vec<i16> = input.iter().copied().filter(|x| *x >= 0).collect();
        let expected_rest: Vec<i16> = input.iter().copied().filter(|x| *x < 0).collect();
        TestResult::from_bool(matched == expected_matched && rest == expected_rest)
    }
    quickcheck(prop as fn(Vec<i16>) -> TestResult);
}

#[test]
fn property_subject_consumers_see_same_values() {
    fn prop(values: Vec<i32>) -> bool {
        block_on(async {
            let subject = Subject::new();
            let first = to_vec(subject.clone());
            let second = to_vec(subject.clone());

            for value in &values {
                if subject.push(*value).is_err() {
                    return false;
                }
            }
            if subject.complete().is_err() {
                return false;
            }

            let (first, second) = tokio::join!(first, second);
            first == Ok(values.clone()) && second == Ok(values)
        })
    }
    quickcheck(prop as fn(Vec<i32>) -> bool);
}
