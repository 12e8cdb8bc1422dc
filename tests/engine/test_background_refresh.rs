use crate::helpers::{article, articles, TestEngine};
use newsfeed_engine::domain::feed::FeedSettings;
use std::time::Duration;

fn fast_refresh() -> FeedSettings {
    FeedSettings::from_millis(20, 60_000, 300_000, 25)
}

#[tokio::test]
async fn it_should_revalidate_the_displayed_page_on_an_interval() {
    let test = TestEngine::new(articles("a", 5, None), fast_refresh());
    let paginator = test.engine.paginator();
    let first = paginator.load().await;
    assert_eq!(first.records.len(), 5);
    assert_eq!(test.articles.calls(), 1);

    test.articles.insert(article("breaking", Some("https://news.example/breaking"), -10));
    test.engine.start_background_refresh();
    assert!(test.engine.is_refreshing());

    test.articles.wait_for_calls(2).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let state = paginator.state();
    assert_eq!(state.records.len(), 6);
    assert_eq!(state.records[0].id, "breaking");

    test.engine.shutdown();
}

#[tokio::test]
async fn it_should_stop_refreshing_after_shutdown() {
    let test = TestEngine::new(articles("a", 5, None), fast_refresh());
    test.engine.paginator().load().await;
    test.engine.start_background_refresh();
    test.articles.wait_for_calls(2).await;

    test.engine.shutdown();
    assert!(!test.engine.is_refreshing());
    tokio::time::sleep(Duration::from_millis(10)).await;
    let calls_at_shutdown = test.articles.calls();

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(test.articles.calls(), calls_at_shutdown);
}

#[tokio::test]
async fn it_should_stop_refreshing_when_the_engine_is_dropped() {
    let test = TestEngine::new(articles("a", 5, None), fast_refresh());
    test.engine.paginator().load().await;
    test.engine.start_background_refresh();
    test.articles.wait_for_calls(2).await;

    let articles = test.articles.clone();
    drop(test);
    tokio::time::sleep(Duration::from_millis(10)).await;
    let calls_at_drop = articles.calls();

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(articles.calls(), calls_at_drop);
}

#[tokio::test]
async fn it_should_not_stack_tasks_when_started_twice() {
    let settings = FeedSettings::from_millis(20, 60_000, 300_000, 40);
    let test = TestEngine::new(articles("a", 5, None), settings);
    test.engine.paginator().load().await;

    test.engine.start_background_refresh();
    test.engine.start_background_refresh();
    tokio::time::sleep(Duration::from_millis(100)).await;
    test.engine.shutdown();

    // one task ticking every 40ms over ~100ms; two tasks would double this
    let refreshes = test.articles.calls() - 1;
    assert!(refreshes <= 3, "unexpected refresh count {refreshes}");
    assert!(refreshes >= 1);
}

#[tokio::test]
async fn it_should_refresh_whichever_page_is_current() {
    let test = TestEngine::new(articles("a", 50, None), fast_refresh());
    let paginator = test.engine.paginator();
    paginator.load().await;
    paginator.go_to_next_page();
    paginator.load().await;
    let calls_before = test.articles.calls();

    test.engine.start_background_refresh();
    test.articles.wait_for_calls(calls_before + 1).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    test.engine.shutdown();

    let state = paginator.state();
    assert_eq!(state.page_number, 2);
    assert_eq!(state.records_page, Some(2));
    assert_eq!(state.records[0].id, "a-20");
}

#[tokio::test]
async fn it_should_keep_data_when_a_background_refresh_fails() {
    let test = TestEngine::new(articles("a", 5, None), fast_refresh());
    let paginator = test.engine.paginator();
    let good = paginator.load().await;

    test.articles.set_failing(true);
    test.engine.start_background_refresh();
    test.articles.wait_for_calls(2).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    test.engine.shutdown();

    let state = paginator.state();
    assert!(state.error.is_some());
    assert_eq!(state.records, good.records);
}
