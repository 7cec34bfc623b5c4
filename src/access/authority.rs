use crate::error::GemError;
use crate::primitives::Address;

/// Gatekeeper for administrative operations.
pub trait Authority: std::fmt::Debug {
    /// Fails with `GemError::Unauthorized` unless `caller` may administer the system.
    fn require_admin(&self, caller: &Address) -> Result<(), GemError>;
}

/// Single-owner privilege: exactly one address administers the system.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SingleOwnerAuthority {
    owner: Address,
}

impl SingleOwnerAuthority {
    pub fn new(owner: Address) -> Self {
        SingleOwnerAuthority { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Hands administration to `new_owner`. Only the current owner may do this.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<(), GemError> {
        self.require_admin(caller)?;
        tracing::info!(from = %self.owner, to = %new_owner, "admin ownership transferred");
        self.owner = new_owner;
        Ok(())
    }
}

impl Authority for SingleOwnerAuthority {
    fn require_admin(&self, caller: &Address) -> Result<(), GemError> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(GemError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::AddressBytes;

    #[test]
    fn only_owner_passes() {
        let auth = SingleOwnerAuthority::new(AddressBytes::repeat(9));
        assert!(auth.require_admin(&AddressBytes::repeat(9)).is_ok());
        assert_eq!(auth.require_admin(&AddressBytes::repeat(1)), Err(GemError::Unauthorized));
    }

    #[test]
    fn ownership_transfer_moves_privilege() {
        let mut auth = SingleOwnerAuthority::new(AddressBytes::repeat(9));
        assert_eq!(
            auth.transfer_ownership(&AddressBytes::repeat(1), AddressBytes::repeat(1)),
            Err(GemError::Unauthorized)
        );
        auth.transfer_ownership(&AddressBytes::repeat(9), AddressBytes::repeat(1)).unwrap();
        assert_eq!(auth.owner(), AddressBytes::repeat(1));
        assert_eq!(auth.require_admin(&AddressBytes::repeat(9)), Err(GemError::Unauthorized));
    }
}
