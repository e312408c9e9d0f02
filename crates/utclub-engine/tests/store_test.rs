//! Pack redemption tests against a scripted session: exhaustion handling,
//! the post-claim interstitials and the duplicate-resolution ordering.

mod common;

use common::{seed_navigation, test_waits, Effect, MockElement, MockSession};
use tempfile::tempdir;
use utclub_engine::diagnostics::DiagnosticsSink;
use utclub_engine::selectors;
use utclub_engine::store::PackRedeemer;
use utclub_engine::task::TaskOutcome;

fn redeemer(dir: &std::path::Path) -> PackRedeemer {
    PackRedeemer::new(test_waits(), DiagnosticsSink::new(dir))
}

fn seed_store(mock: &MockSession) {
    seed_navigation(mock);
    mock.attach(&selectors::PACKS_TILE, "packs-tile", MockElement::new());
    mock.attach(&selectors::PACK_HUB_CONTENT, "hub", MockElement::new());
}

/// One claimable copy of the named pack sitting in the hub.
fn seed_claimable_pack(mock: &MockSession, name: &str) {
    mock.attach(&selectors::pack_tile(name), "pack-tile", MockElement::new());
    mock.attach(&selectors::pack_claim(name), "pack-claim", MockElement::new());
    // Claiming consumes the tile.
    mock.on_click(
        "pack-claim",
        Effect::detach(&selectors::pack_tile(name), "pack-tile"),
    );
    mock.on_click(
        "pack-claim",
        Effect::detach(&selectors::pack_claim(name), "pack-claim"),
    );
}

/// The claimed-items screen: bulk menu, store-all, then the duplicates
/// section with its own bulk-action popups.
fn seed_claimed_items_flow(mock: &MockSession, with_duplicates: bool) {
    mock.on_click(
        "pack-claim",
        Effect::attach(&selectors::BULK_MENU_BUTTON, "bulk-menu"),
    );
    mock.insert("bulk-menu", MockElement::new());
    mock.on_click(
        "bulk-menu",
        Effect::attach(&selectors::STORE_ALL_IN_CLUB, "store-all"),
    );
    mock.insert("store-all", MockElement::new());
    if !with_duplicates {
        return;
    }
    mock.on_click(
        "store-all",
        Effect::attach(&selectors::DUPLICATES_HEADER, "dup-header"),
    );
    mock.insert("dup-header", MockElement::new());
    mock.on_click(
        "store-all",
        Effect::attach(&selectors::DUPLICATES_BULK_MENU, "dup-menu"),
    );
    mock.insert("dup-menu", MockElement::new());
    mock.on_click(
        "dup-menu",
        Effect::attach(&selectors::SWAP_TRADEABLE_DUPLICATES, "swap-btn"),
    );
    mock.insert("swap-btn", MockElement::new());
    mock.on_click(
        "dup-menu",
        Effect::attach(&selectors::QUICK_SELL_DUPLICATES, "sell-btn"),
    );
    mock.insert("sell-btn", MockElement::new());
    mock.on_click(
        "swap-btn",
        Effect::attach(&selectors::CONFIRM_SWAP_YES, "confirm-yes"),
    );
    mock.insert("confirm-yes", MockElement::new());
    mock.on_click(
        "sell-btn",
        Effect::attach(&selectors::CONFIRM_SELL_OK, "confirm-ok"),
    );
    mock.insert("confirm-ok", MockElement::new());
}

#[tokio::test]
async fn empty_pack_list_is_skipped() {
    let dir = tempdir().unwrap();
    let mock = MockSession::new();

    let outcome = redeemer(dir.path()).redeem_packs(&mock, &[]).await;

    assert_eq!(outcome, TaskOutcome::Skipped);
    assert!(mock.clicks().is_empty());
}

#[tokio::test]
async fn exhausted_pack_type_completes_without_error() {
    let dir = tempdir().unwrap();
    let mock = MockSession::new();
    seed_store(&mock);

    let outcome = redeemer(dir.path())
        .redeem_packs(&mock, &["Gold Pack".to_string()])
        .await;

    // Scroll budget runs out, the name is exhausted, the task completes.
    assert_eq!(outcome, TaskOutcome::Completed);
    assert_eq!(mock.screenshot_count(), 0);
}

#[tokio::test]
async fn duplicates_are_swapped_before_selling() {
    let dir = tempdir().unwrap();
    let mock = MockSession::new();
    seed_store(&mock);
    seed_claimable_pack(&mock, "Gold Pack");
    seed_claimed_items_flow(&mock, true);

    let outcome = redeemer(dir.path())
        .redeem_packs(&mock, &["Gold Pack".to_string()])
        .await;

    assert_eq!(outcome, TaskOutcome::Completed);
    assert_eq!(mock.click_count("pack-claim"), 1);
    assert_eq!(mock.click_count("store-all"), 1);
    assert_eq!(mock.click_count("swap-btn"), 1);
    assert_eq!(mock.click_count("sell-btn"), 1);
    // Swap and its confirmation strictly precede the quick-sell.
    assert!(mock.first_click_index("swap-btn") < mock.first_click_index("confirm-yes"));
    assert!(mock.first_click_index("confirm-yes") < mock.first_click_index("sell-btn"));
    assert!(mock.first_click_index("sell-btn") < mock.first_click_index("confirm-ok"));
}

#[tokio::test]
async fn missing_duplicates_screen_is_not_an_error() {
    let dir = tempdir().unwrap();
    let mock = MockSession::new();
    seed_store(&mock);
    seed_claimable_pack(&mock, "Gold Pack");
    seed_claimed_items_flow(&mock, false);

    let outcome = redeemer(dir.path())
        .redeem_packs(&mock, &["Gold Pack".to_string()])
        .await;

    assert_eq!(outcome, TaskOutcome::Completed);
    assert_eq!(mock.click_count("store-all"), 1);
    assert_eq!(mock.screenshot_count(), 0);
}

#[tokio::test]
async fn unassigned_items_dialog_fails_after_bounded_retries() {
    let dir = tempdir().unwrap();
    let mock = MockSession::new();
    seed_store(&mock);
    mock.attach(
        &selectors::pack_tile("Gold Pack"),
        "pack-tile",
        MockElement::new(),
    );
    mock.attach(
        &selectors::pack_claim("Gold Pack"),
        "pack-claim",
        MockElement::new(),
    );
    // Claiming raises the blocking dialog instead of the claimed-items
    // screen.
    mock.on_click(
        "pack-claim",
        Effect::attach(&selectors::MESSAGE_DIALOG, "dialog"),
    );
    mock.insert(
        "dialog",
        MockElement::new().child(&selectors::DIALOG_TITLE, "dialog-title"),
    );
    mock.insert(
        "dialog-title",
        MockElement::new().text("Unassigned Items Remain"),
    );

    let outcome = redeemer(dir.path())
        .redeem_packs(&mock, &["Gold Pack".to_string()])
        .await;

    assert_eq!(outcome, TaskOutcome::Failed);
    assert_eq!(mock.click_count("pack-claim"), 3);
    assert_eq!(mock.screenshot_count(), 3);
    assert_eq!(mock.click_count("store-all"), 0);
}
