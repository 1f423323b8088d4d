//! Solidity ABI interfaces whose call encodings this crate produces or consumes.
//!
//! The cross-domain messenger interfaces pin the two `relayMessage` wire formats; `IERC1271` is
//! the callback contract signers implement.

use alloy_sol_types::sol;

sol! {
    /// Pre-Bedrock messenger. Version 0 cross-domain messages are calls to this signature.
    interface ILegacyCrossDomainMessenger {
        function relayMessage(address _target, address _sender, bytes _message, uint256 _messageNonce) external;
    }

    /// Current messenger. Version 1 cross-domain messages are calls to this signature.
    interface ICrossDomainMessenger {
        function relayMessage(
            uint256 _nonce,
            address _sender,
            address _target,
            uint256 _value,
            uint256 _minGasLimit,
            bytes _message
        ) external payable;
    }

    interface IERC1271 {
        function isValidSignature(bytes32 hash, bytes signature) external view returns (bytes4 magicValue);
    }
}

/// `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`, returned by a contract signer that accepts.
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];
