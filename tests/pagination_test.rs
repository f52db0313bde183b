//! Integration tests for page aggregation.

use aws_facade::pagination::{aggregate, collect_all, Page, Summed};
use proptest::prelude::*;
use std::cell::Cell;
use std::future::{ready, Ready};

type CountedPage = Page<u32, Summed<u64>>;

/// Serves `pages` in order, linking them with their index as token.
fn serve(
    pages: Vec<Vec<u32>>,
    fail_at: Option<usize>,
    calls: &Cell<usize>,
) -> impl FnMut(Option<String>) -> Ready<Result<CountedPage, String>> + '_ {
    move |token| {
        calls.set(calls.get() + 1);
        let index = token.map_or(0, |t| t.parse::<usize>().unwrap());
        if fail_at == Some(index) {
            return ready(Err(format!("page {} failed", index)));
        }
        let items = pages[index].clone();
        let next = (index + 1 < pages.len()).then(|| (index + 1).to_string());
        let count = items.len() as u64;
        ready(Ok(Page::<u32, (), String>::new(items, next).with_metadata(Summed(count))))
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().build().unwrap()
}

proptest! {
    #[test]
    fn aggregate_concatenates_and_sums(pages in prop::collection::vec(prop::collection::vec(any::<u32>(), 0..8), 1..12)) {
        let calls = Cell::new(0);
        let result = runtime().block_on(aggregate(serve(pages.clone(), None, &calls))).unwrap();

        let expected: Vec<u32> = pages.iter().flatten().copied().collect();
        prop_assert_eq!(&result.items, &expected);
        prop_assert_eq!(result.metadata.get(), expected.len() as u64);
        prop_assert_eq!(result.pages, pages.len());
        prop_assert_eq!(calls.get(), pages.len());
    }

    #[test]
    fn failure_on_any_page_discards_everything(
        pages in prop::collection::vec(prop::collection::vec(any::<u32>(), 1..4), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let fail_at = pick.index(pages.len());
        let calls = Cell::new(0);
        let result = runtime().block_on(collect_all(serve(pages, Some(fail_at), &calls)));

        prop_assert_eq!(result, Err(format!("page {} failed", fail_at)));
        prop_assert_eq!(calls.get(), fail_at + 1);
    }
}

#[tokio::test]
async fn test_single_page_is_returned_unchanged() {
    let calls = Cell::new(0);
    let result = aggregate(serve(vec![vec![7, 7, 3]], None, &calls)).await.unwrap();

    assert_eq!(result.items, vec![7, 7, 3]);
    assert_eq!(result.metadata, Summed(3));
    assert_eq!(result.pages, 1);
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_counts_across_three_pages() {
    let calls = Cell::new(0);
    let pages = vec![vec![1, 2], vec![3, 4, 5], vec![6]];
    let result = aggregate(serve(pages, None, &calls)).await.unwrap();

    assert_eq!(result.len(), 6);
    assert_eq!(result.metadata.get(), 6);
    assert_eq!(calls.get(), 3);
}

#[tokio::test]
async fn test_empty_token_ends_listing() {
    let mut served = 0;
    let items = collect_all(|_token: Option<String>| {
        served += 1;
        ready(Ok::<_, String>(Page::<u32>::new(vec![served], Some(String::new()))))
    })
    .await
    .unwrap();

    assert_eq!(items, vec![1]);
}
