//! Every structural locator the engine uses, in one place.
//!
//! Static selectors are consts; selectors parameterized by a display name or
//! slot index are builder functions. Locators are structural, never
//! pixel-based.

use std::borrow::Cow;

use crate::locator::Locator;

const fn css(selector: &'static str) -> Locator {
    Locator::Css(Cow::Borrowed(selector))
}

const fn xpath(expression: &'static str) -> Locator {
    Locator::XPath(Cow::Borrowed(expression))
}

// Navigation

pub const TAB_BAR: Locator = css("nav.ut-tab-bar");
pub const TAB_CHALLENGES: Locator = css("button.ut-tab-bar-item.icon-sbc");
pub const TAB_STORE: Locator = css("button.ut-tab-bar-item.icon-store");
pub const MENU_CONTAINER: Locator = css("div.menu-container");
pub const UPGRADES_MENU_ITEM: Locator = xpath("//button[contains(text(), 'Upgrades')]");

// Challenge hub

pub const CHALLENGE_GRID: Locator = css("div.col-1-2-md.col-1-1.ut-sbc-set-tile-view");
pub const CHALLENGE_LIST: Locator = css("div.ut-navigation-container-view--content .container");
pub const TILE_HEADER: Locator = css("h1.tileTitle");
pub const REPEAT_LABEL: Locator =
    css("div.ut-squad-building-set-status-label-view.repeat span.text");
pub const START_CHALLENGE: Locator = xpath(
    "//button[contains(@class, 'btn-standard') and contains(@class, 'call-to-action') \
     and (contains(text(), 'Start Challenge') or contains(text(), 'Go to Challenge'))]",
);

/// Challenge tile root, found by its title text.
pub fn challenge_tile(name: &str) -> Locator {
    Locator::xpath(format!(
        "//h1[@class='tileTitle' and contains(text(), '{name}')]\
         /ancestor::div[contains(@class, 'ut-sbc-set-tile-view')]"
    ))
}

// Squad panel

pub const SQUAD_PANEL: Locator = css("section.SquadPanel.SBCSquadPanel");
pub const PITCH_VIEW: Locator = css(".ut-squad-pitch-view.sbc");
pub const USE_SQUAD_BUILDER: Locator =
    xpath("//button[contains(text(), 'Use Squad Builder') and not(contains(@class, 'disabled'))]");
pub const BUILD_BUTTON: Locator = xpath("//button[contains(text(), 'Build')]");
pub const IGNORE_POSITION_TOGGLE: Locator = xpath(
    "//span[contains(text(), 'Ignore Position')]/../div[contains(@class, 'ut-toggle-control')]\
     /div[contains(@class, 'ut-toggle-control--track')]",
);
pub const REQUIREMENTS_POPOVER: Locator = css("div.ut-popover");
pub const ADD_PLAYER: Locator =
    xpath("//button[span[@class='btn-text' and text()='Add Player']]");
pub const SLOT_LABEL: Locator = css("span.label");
pub const SLOT_RATING: Locator = css("div.playerOverview div.rating");

pub fn squad_slot(index: usize) -> Locator {
    Locator::css(format!("div.ut-squad-slot-view[index='{index}']"))
}

// Search filters

pub const SORT_DROPDOWN: Locator = css("div.inline-list-select.ut-drop-down-control");
pub const QUALITY_DROPDOWN: Locator = xpath(
    "//div[contains(@class, 'ut-search-filter-control--row') and \
     (.//span[text()='Quality'] or .//span[text()='Bronze'] or \
     .//span[text()='Silver'] or .//span[text()='Gold'])]",
);
pub const RARITY_DROPDOWN: Locator = xpath(
    "//div[contains(@class, 'ut-search-filter-control--row') and \
     (.//span[text()='Rarity'] or .//span[text()='Rare'] or .//span[text()='Common'])]",
);
pub const SOURCE_DROPDOWN: Locator =
    xpath("//div[contains(@class, 'ut-search-filter-control--row') and .//span[text()='My Club']]");
pub const SEARCH_BUTTON: Locator = xpath(
    "//button[contains(@class, 'btn-standard') and contains(@class, 'call-to-action') \
     and text()='Search']",
);
pub const FIRST_RESULT_ADD: Locator = xpath("//li//button[contains(@class, 'add')]");

pub fn dropdown_option(label: &str) -> Locator {
    Locator::xpath(format!("//li[contains(text(), '{label}')]"))
}

/// Option inside an expanded inline-list dropdown (quality tiers).
pub fn inline_option(label: &str) -> Locator {
    Locator::xpath(format!(
        "//div[contains(@class, 'inline-list-select')]//ul[@class='inline-list']\
         /li[contains(text(), '{label}')]"
    ))
}

/// Option rendered with a tier icon (rarity, inventory source).
pub fn icon_option(label: &str) -> Locator {
    Locator::xpath(format!(
        "//li[contains(@class, 'with-icon') and text()='{label}']"
    ))
}

// Submission

pub const REQUIREMENTS_CHECKLIST: Locator = css("ul.sbc-requirements-checklist");
pub const CHECKLIST_ITEM: Locator = css("li");
pub const SUBMIT_BUTTON: Locator = xpath(
    "//button[contains(@class, 'ut-squad-tab-button-control') and \
     contains(@class, 'call-to-action') and contains(., 'Submit')]",
);
pub const CLAIM_REWARDS: Locator = xpath(
    "//button[contains(@class, 'btn-standard') and contains(@class, 'call-to-action') \
     and contains(text(), 'Claim Rewards')]",
);

// Store

pub const PACKS_TILE: Locator =
    xpath("//div[contains(@class, 'tile') and contains(@class, 'packs-tile')]");
pub const PACK_HUB_CONTENT: Locator = css("div.ut-store-hub-view--content");
pub const MESSAGE_DIALOG: Locator = css("section.ea-dialog-view.ea-dialog-view-type--message");
pub const DIALOG_TITLE: Locator = css("header > h1");
pub const BULK_MENU_BUTTON: Locator = css("button.ut-image-button-control.ellipsis-btn");
pub const STORE_ALL_IN_CLUB: Locator = xpath("//button[.//span[text()='Store All in Club']]");
pub const DUPLICATES_HEADER: Locator = xpath(
    "//header[@class='ut-section-header-view']\
     //h2[@class='title' and text()='Untradeable Duplicates']",
);
pub const DUPLICATES_BULK_MENU: Locator = xpath(
    "//header[@class='ut-section-header-view']//button[contains(@class, 'ellipsis-btn')]",
);
pub const SWAP_TRADEABLE_DUPLICATES: Locator = xpath(
    "//div[@class='ut-bulk-action-popup-view']\
     //button[.//span[text()='Swap in all Tradeable Duplicate items']]",
);
pub const QUICK_SELL_DUPLICATES: Locator = xpath(
    "//div[@class='ut-bulk-action-popup-view']//button[.//span[contains(text(), 'Quick Sell')]]",
);
pub const CONFIRM_SWAP_YES: Locator = xpath(
    "//div[@class='ut-action-confirmation-popup-view']//button[.//span[text()='Yes']]",
);
pub const CONFIRM_SELL_OK: Locator = xpath(
    "//section[@class='ea-dialog-view ea-dialog-view-type--message']\
     //button[.//span[text()='Ok']]",
);

pub fn pack_tile(name: &str) -> Locator {
    Locator::xpath(format!(
        "//h1[@class='ut-store-pack-details-view--title']//span[text()='{name}']"
    ))
}

pub fn pack_claim(name: &str) -> Locator {
    Locator::xpath(format!(
        "//h1[@class='ut-store-pack-details-view--title']//span[text()='{name}']\
         /ancestor::div[contains(@class, 'ut-store-pack-details-view')]\
         //span[contains(@class, 'subtext') and text()='Claim your Pack']"
    ))
}
