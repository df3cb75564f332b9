//! Lineage operations
//!
//! Mutations driven by on-chain spends of the identity coin: setting the
//! origin, extending the parent history, replacing the inner program.

use did_state::{Bytes32, Coin, IdentityWalletState, LineageProof, Program};

use crate::error::WalletError;

/// Anchor the identity to its origin coin
///
/// Setting the same origin again is a no-op; a different one is refused.
pub fn establish_origin(state: &mut IdentityWalletState, coin: Coin) -> Result<(), WalletError> {
    match state.origin_coin {
        Some(existing) if existing == coin => Ok(()),
        Some(existing) => Err(WalletError::OriginAlreadySet(existing.name())),
        None => {
            log::info!("Identity established: {}", coin.name());
            state.origin_coin = Some(coin);
            Ok(())
        }
    }
}

/// Append a coin to the spend history
///
/// The history is append-only; a coin id already present is refused.
pub fn add_parent(
    state: &mut IdentityWalletState,
    coin_id: Bytes32,
    lineage: Option<LineageProof>,
) -> Result<(), WalletError> {
    if state.contains_parent(&coin_id) {
        return Err(WalletError::DuplicateParent(coin_id));
    }
    log::debug!(
        "Adding parent {} (lineage {})",
        coin_id,
        if lineage.is_some() { "known" } else { "unknown" }
    );
    state.parent_history.push((coin_id, lineage));
    Ok(())
}

pub fn set_inner_program(state: &mut IdentityWalletState, program: Program) {
    log::debug!("Inner program updated: {}", program.hash());
    state.current_inner_program = Some(program);
}
