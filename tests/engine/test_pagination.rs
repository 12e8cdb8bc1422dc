use crate::helpers::fixtures::settings;
use crate::helpers::{article, articles, ScriptedArticleSource, TestEngine};
use newsfeed_engine::domain::feed::{FeedError, FeedService, FeedServiceApi, PageCache, Paginator};
use newsfeed_engine::infrastructure::repositories::InMemoryArticleRepository;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn paginator_over(source: Arc<ScriptedArticleSource>, page_size: u32) -> Paginator {
    let feed = Arc::new(FeedService::new(source, page_size));
    let cache = Arc::new(PageCache::new(Duration::from_secs(60), Duration::from_secs(300)));
    Paginator::new(feed, cache)
}

#[tokio::test]
async fn it_should_assume_more_rows_after_a_full_page() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 65, None)));
    let paginator = paginator_over(source, 20);

    paginator.go_to_page(3);
    let state = paginator.load().await;

    assert_eq!(state.records.len(), 20);
    assert_eq!(state.total_count, 61);
    assert_eq!(state.total_pages(), 4);
    assert!(state.has_more());
    assert!(state.has_previous());
}

#[tokio::test]
async fn it_should_treat_a_partial_page_as_the_end() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 47, None)));
    let paginator = paginator_over(source, 20);

    paginator.go_to_page(3);
    let state = paginator.load().await;

    assert_eq!(state.records.len(), 7);
    assert_eq!(state.total_count, 47);
    assert_eq!(state.total_pages(), 3);
    assert!(!state.has_more());
}

#[tokio::test]
async fn it_should_use_exact_counts_when_the_store_reports_them() {
    let repo = InMemoryArticleRepository::new(articles("a", 45, None)).with_exact_counts();
    let source = Arc::new(ScriptedArticleSource::from_repository(repo));
    let paginator = paginator_over(source, 20);

    let state = paginator.load().await;

    assert_eq!(state.total_count, 45);
    assert_eq!(state.total_pages(), 3);
    assert!(state.has_more());
}

#[tokio::test]
async fn it_should_return_records_newest_first_for_the_requested_window() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 30, None)));
    let paginator = paginator_over(source, 10);

    paginator.go_to_page(2);
    let state = paginator.load().await;

    let ids: Vec<&str> = state.records.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<String> = (10..20).map(|i| format!("a-{i}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(state.records_page, Some(2));
}

#[tokio::test]
async fn it_should_deduplicate_within_a_page_but_estimate_from_the_raw_window() {
    let records = vec![
        article("1", Some("https://news.example/same"), 0),
        article("2", Some("https://news.example/b"), 1),
        article("3", Some("https://news.example/same"), 2),
        article("4", None, 3),
        article("5", None, 4),
        article("6", Some("https://news.example/c"), 5),
    ];
    let source = Arc::new(ScriptedArticleSource::new(records));
    let paginator = paginator_over(source, 5);

    let state = paginator.load().await;

    let ids: Vec<&str> = state.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "4", "5"]);
    assert_eq!(state.total_count, 6);
    assert!(state.has_more());
}

#[tokio::test]
async fn it_should_ignore_previous_on_the_first_page() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 50, None)));
    let paginator = paginator_over(source, 20);
    paginator.load().await;

    let before = paginator.state();
    paginator.go_to_previous_page();

    assert_eq!(paginator.state(), before);
    assert_eq!(paginator.state().page_number, 1);
}

#[tokio::test]
async fn it_should_ignore_next_when_there_is_no_more() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 47, None)));
    let paginator = paginator_over(source, 20);
    paginator.go_to_page(3);
    paginator.load().await;

    let before = paginator.state();
    assert!(!before.has_more());
    paginator.go_to_next_page();

    assert_eq!(paginator.state(), before);
}

#[tokio::test]
async fn it_should_ignore_next_before_anything_is_loaded() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 50, None)));
    let paginator = paginator_over(source, 20);

    paginator.go_to_next_page();

    assert_eq!(paginator.state().page_number, 1);
}

#[tokio::test]
async fn it_should_step_forward_and_back() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 50, None)));
    let paginator = paginator_over(source, 20);
    paginator.load().await;

    paginator.go_to_next_page();
    let state = paginator.load().await;
    assert_eq!(state.page_number, 2);
    assert_eq!(state.records[0].id, "a-20");

    paginator.go_to_previous_page();
    let state = paginator.load().await;
    assert_eq!(state.page_number, 1);
    assert_eq!(state.records[0].id, "a-0");
}

#[tokio::test]
async fn it_should_jump_to_any_page_without_clamping() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 10, None)));
    let paginator = paginator_over(source, 20);
    paginator.load().await;

    paginator.go_to_page(7);
    assert_eq!(paginator.state().page_number, 7);

    paginator.go_to_page(0);
    assert_eq!(paginator.state().page_number, 1);
}

#[tokio::test]
async fn it_should_keep_old_records_visible_while_a_new_page_loads() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 50, None)));
    let paginator = paginator_over(source, 20);
    paginator.load().await;

    paginator.go_to_page(2);
    let state = paginator.state();

    assert_eq!(state.page_number, 2);
    assert_eq!(state.records_page, Some(1));
    assert_eq!(state.records[0].id, "a-0");
}

#[tokio::test]
async fn it_should_reset_to_page_one_on_category_change() {
    let mut records = articles("world", 120, Some("world"));
    records.extend(articles("tech", 5, Some("tech")));
    let source = Arc::new(ScriptedArticleSource::new(records));
    let paginator = paginator_over(source, 20);

    paginator.set_category(Some("world".to_string()));
    paginator.go_to_page(5);
    let state = paginator.load().await;
    assert_eq!(state.page_number, 5);
    assert_eq!(state.records.len(), 20);

    paginator.set_category(Some("tech".to_string()));
    let state = paginator.state();
    assert_eq!(state.page_number, 1);
    assert!(state.records.is_empty());
    assert_eq!(state.records_page, None);
    assert_eq!(state.total_count, 0);

    let state = paginator.load().await;
    assert_eq!(state.records.len(), 5);
    assert!(state.records.iter().all(|r| r.category.as_deref() == Some("tech")));
}

#[tokio::test]
async fn it_should_keep_last_good_data_when_a_fetch_fails() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 30, None)));
    let paginator = paginator_over(source.clone(), 20);
    let good = paginator.load().await;

    source.set_failing(true);
    let state = paginator.refresh().await;

    assert!(matches!(state.error, Some(FeedError::TransientFetch(_))));
    assert_eq!(state.page_number, good.page_number);
    assert_eq!(state.total_count, good.total_count);
    assert_eq!(state.records, good.records);

    source.set_failing(false);
    let state = paginator.refresh().await;
    assert!(state.error.is_none());
}

#[tokio::test]
async fn it_should_not_move_pages_when_navigation_target_fails() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 50, None)));
    let paginator = paginator_over(source.clone(), 20);
    paginator.load().await;

    source.set_failing(true);
    paginator.go_to_next_page();
    let state = paginator.load().await;

    assert_eq!(state.page_number, 2);
    assert_eq!(state.records_page, Some(1));
    assert_eq!(state.total_count, 21);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn it_should_discard_a_superseded_page_result() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 100, None)));
    let paginator = paginator_over(source.clone(), 20);
    let page_two_gate = source.hold(20);

    paginator.go_to_page(2);
    let slow = {
        let paginator = paginator.clone();
        tokio::spawn(async move { paginator.load().await })
    };
    source.wait_for_calls(1).await;

    paginator.go_to_page(3);
    let state = paginator.load().await;
    assert_eq!(state.records_page, Some(3));

    page_two_gate.notify_one();
    let late = slow.await.unwrap();

    assert_eq!(late.page_number, 3);
    assert_eq!(late.records_page, Some(3));
    assert_eq!(paginator.state().records[0].id, "a-40");
}

#[tokio::test]
async fn it_should_share_one_fetch_between_concurrent_loads() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 30, None)));
    source.set_delay(Duration::from_millis(30));
    let paginator = paginator_over(source.clone(), 20);

    let (first, second) = tokio::join!(paginator.load(), paginator.load());

    assert_eq!(source.calls(), 1);
    assert_eq!(first.records, second.records);
}

#[tokio::test]
async fn it_should_reject_page_zero_at_the_service() {
    let source = Arc::new(ScriptedArticleSource::new(articles("a", 5, None)));
    let feed = FeedService::new(source.clone(), 20);

    let result = feed.fetch_page(0, None).await;

    assert!(matches!(result, Err(FeedError::Invalid(_))));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn it_should_expose_the_paginator_through_the_engine() {
    let test = TestEngine::new(articles("a", 25, None), settings(20));

    let state = test.engine.paginator().load().await;

    assert_eq!(state.page_size, 20);
    assert_eq!(state.total_count, 21);
    assert_eq!(test.articles.calls(), 1);
}
