#![no_std]

// Closed set of `InvalidInput` reasons. Every `require!` in lending_core points at one of
// these; do not invent a new string without adding it here first.

pub static ERROR_CANT_SUPPLY_ZERO: &[u8] = b"cant supply 0";
pub static ERROR_CANT_BORROW_ZERO: &[u8] = b"cant borrow 0";

pub static ERROR_LENDING_ID_CANCELLED: &[u8] = b"lendingId cancelled";
pub static ERROR_LENDING_ID_FINISHED: &[u8] = b"lendingId finished";
pub static ERROR_LENDING_ID_ACTIVE: &[u8] = b"lendingId active";
pub static ERROR_LENDING_ID_IN_LIQUIDATION: &[u8] = b"lendingId in liquidation";

pub static ERROR_WRONG_SENDER: &[u8] = b"msg.sender";

pub static ERROR_CANCEL_TOO_SOON: &[u8] = b"cancel too soon";
pub static ERROR_ALREADY_CHOSEN: &[u8] = b"chosen";
pub static ERROR_NO_BORROW_OFFER: &[u8] = b"no borrow offer";
pub static ERROR_OFFER_CANCELLED: &[u8] = b"offer cancelled";

pub static ERROR_REFI_PARAMS_NOT_SET: &[u8] = b"refi params not set";
pub static ERROR_PARAMS_ALREADY_SET: &[u8] = b"params already set";
pub static ERROR_REFI_NONCE_ALREADY_ACCEPTED: &[u8] = b"refi nonce already accepted";
pub static ERROR_REPAID_DEBT_CHANGED: &[u8] = b"repaid debt changed";
pub static ERROR_EXTRA_DEMANDED_CHANGED: &[u8] = b"extra demanded changed";
pub static ERROR_SUPPLY_BELOW_MINIMUM: &[u8] = b"supply below minimum";

pub static ERROR_EXPIRED: &[u8] = b"expired";
pub static ERROR_ARRANGEMENT_EXPIRED: &[u8] = b"arrangement expired";
pub static ERROR_NOT_EXPIRED: &[u8] = b"not expired";

pub static ERROR_WRONG_LIQUIDATOR: &[u8] = b"wrong liquidator";
pub static ERROR_IN_LIQUIDATION: &[u8] = b"in liquidation";

pub static ERROR_STALE_REQUEST: &[u8] = b"front-running guard failed";

/// The only non-`InvalidInput` error: a ledger-side debit that could not be satisfied.
pub static ERROR_CUSTODY_FAILURE: &[u8] = b"CustodyFailure";
