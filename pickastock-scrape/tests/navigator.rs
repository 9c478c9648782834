mod common;

use common::{FakeSession, card, init_test_tracing, page};
use pickastock_common::{PaginationMode, ScrapeError, TARGET_NAME};
use pickastock_scrape::{Navigator, NavigatorOptions};

fn options(max_pages: u32, pagination: PaginationMode) -> NavigatorOptions {
    NavigatorOptions {
        max_pages,
        pagination,
        ..NavigatorOptions::default()
    }
}

fn epf_page(n: usize, has_next: bool) -> common::FakePage {
    page(
        &[
            card(&format!("page {n}"), TARGET_NAME, &format!("{},000", n * 100), None, None),
            card("other holder", "KUMPULAN WANG PERSARAAN", "5,000", None, None),
        ],
        has_next,
    )
}

#[tokio::test]
async fn visits_exactly_max_pages_when_next_is_always_present() {
    init_test_tracing();
    let pages = (1..=12).map(|n| epf_page(n, true)).collect();
    let mut session = FakeSession::new(pages);

    let records = Navigator::new(&mut session, options(10, PaginationMode::Session))
        .run()
        .await
        .unwrap();

    assert_eq!(session.sources, 10);
    assert_eq!(session.gotos, 1);
    assert_eq!(session.clicks, 9);
    assert_eq!(records.len(), 10);
    let titles: Vec<_> = records.iter().map(|r| r.title.clone().unwrap()).collect();
    let expected: Vec<_> = (1..=10).map(|n| format!("page {n}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn stops_without_error_when_next_control_disappears() {
    init_test_tracing();
    let pages = vec![epf_page(1, true), epf_page(2, true), epf_page(3, false), epf_page(4, true)];
    let mut session = FakeSession::new(pages);

    let records = Navigator::new(&mut session, options(10, PaginationMode::Session))
        .run()
        .await
        .unwrap();

    assert_eq!(session.sources, 3);
    assert_eq!(session.clicks, 2);
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].title.as_deref(), Some("page 3"));
}

#[tokio::test]
async fn reload_mode_reloads_the_search_url_every_page() {
    init_test_tracing();
    let pages = (1..=5).map(|n| epf_page(n, true)).collect();
    let mut session = FakeSession::new(pages);

    let records = Navigator::new(&mut session, options(3, PaginationMode::Reload))
        .run()
        .await
        .unwrap();

    assert_eq!(session.gotos, 3);
    assert_eq!(session.sources, 3);
    // Each reload lands on the first page again.
    assert!(records.iter().all(|r| r.title.as_deref() == Some("page 1")));
}

#[tokio::test]
async fn timeout_after_click_aborts_the_run() {
    init_test_tracing();
    let pages = vec![epf_page(1, true), epf_page(2, true)];
    let mut session = FakeSession::new(pages);
    session.timeout_on_page = Some(1);

    let err = Navigator::new(&mut session, options(10, PaginationMode::Session))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::PageLoadTimeout { ref selector, timeout_secs: 60 } if selector == ".search-card"
    ));
    assert_eq!(session.sources, 1);
}

#[tokio::test]
async fn initial_load_timeout_aborts_before_extraction() {
    init_test_tracing();
    let mut session = FakeSession::new(vec![epf_page(1, true)]);
    session.timeout_on_page = Some(0);

    let err = Navigator::new(&mut session, NavigatorOptions::default())
        .run()
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(session.sources, 0);
}

#[tokio::test]
async fn zero_page_budget_is_rejected() {
    let mut session = FakeSession::new(vec![epf_page(1, false)]);
    let err = Navigator::new(&mut session, options(0, PaginationMode::Session))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Config(_)));
    assert_eq!(session.gotos, 0);
}

#[tokio::test]
async fn slow_navigation_never_rescrapes_the_previous_page() {
    init_test_tracing();
    let pages = (1..=4).map(|n| epf_page(n, true)).collect();
    let mut session = FakeSession::new(pages);
    session.navigation_lag = 3;

    let records = Navigator::new(&mut session, options(4, PaginationMode::Session))
        .run()
        .await
        .unwrap();

    let titles: Vec<_> = records.iter().map(|r| r.title.clone().unwrap()).collect();
    assert_eq!(titles, ["page 1", "page 2", "page 3", "page 4"]);
    assert_eq!(session.sources, 4);
    assert!(session.detach_polls >= 3 * 3);
}

#[tokio::test]
async fn navigation_that_never_lands_times_out() {
    init_test_tracing();
    let pages = vec![epf_page(1, true), epf_page(2, true)];
    let mut session = FakeSession::new(pages);
    session.stuck = true;

    let err = Navigator::new(&mut session, options(10, PaginationMode::Session))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::PageLoadTimeout { ref selector, .. } if selector == ".search-card"
    ));
    assert_eq!(session.sources, 1);
}
