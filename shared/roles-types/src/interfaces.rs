//! Solidity ABI surface of the Roles modifier.
//!
//! Governance calls, dispatch entry points, events and custom errors are declared
//! once here so the modifier (decoding) and the SDK (encoding) agree bit-for-bit.

use alloy_sol_types::sol;

sol! {
    /// Wire form of a condition node (`ParameterType` / `Operator` as raw discriminants).
    #[derive(Debug, PartialEq, Eq)]
    struct ConditionFlat {
        uint8 parent;
        uint8 paramType;
        uint8 operator;
        bytes compValue;
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IRoles {
        function assignRoles(address module, bytes32[] roleKeys, bool[] memberOf) external;
        function setDefaultRole(address module, bytes32 roleKey) external;
        function setMultisend(address multisend) external;
        function transferOwnership(address newOwner) external;

        function allowTarget(bytes32 roleKey, address targetAddress, uint8 options) external;
        function revokeTarget(bytes32 roleKey, address targetAddress) external;
        function scopeTarget(bytes32 roleKey, address targetAddress) external;
        function scopeAllowFunction(bytes32 roleKey, address targetAddress, bytes4 selector, uint8 options) external;
        function scopeRevokeFunction(bytes32 roleKey, address targetAddress, bytes4 selector) external;
        function scopeFunction(
            bytes32 roleKey,
            address targetAddress,
            bytes4 selector,
            ConditionFlat[] conditions,
            uint8 options
        ) external;
        function scopeFunctionExecutionOptions(bytes32 roleKey, address targetAddress, bytes4 selector, uint8 options) external;
        function scopeParameter(
            bytes32 roleKey,
            address targetAddress,
            bytes4 selector,
            uint8 index,
            uint8 paramType,
            uint8 operator,
            bytes compValue
        ) external;
        function scopeParameterAsOneOf(
            bytes32 roleKey,
            address targetAddress,
            bytes4 selector,
            uint8 index,
            uint8 paramType,
            bytes[] compValues
        ) external;
        function unscopeParameter(bytes32 roleKey, address targetAddress, bytes4 selector, uint8 index) external;

        function execTransactionFromModule(address to, uint256 value, bytes data, uint8 operation)
            external
            returns (bool success);
        function execTransactionFromModuleReturnData(address to, uint256 value, bytes data, uint8 operation)
            external
            returns (bool success, bytes returnData);
        function execTransactionWithRole(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            bytes32 roleKey,
            bool shouldRevert
        ) external returns (bool success);
        function execTransactionWithRoleReturnData(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            bytes32 roleKey,
            bool shouldRevert
        ) external returns (bool success, bytes returnData);

        event AssignRoles(address module, bytes32[] roleKeys, bool[] memberOf);
        event SetDefaultRole(address module, bytes32 defaultRoleKey);
        event SetMultisendAddress(address multisendAddress);
        event OwnershipTransferred(address previousOwner, address newOwner);
        event AllowTarget(bytes32 roleKey, address targetAddress, uint8 options);
        event RevokeTarget(bytes32 roleKey, address targetAddress);
        event ScopeTarget(bytes32 roleKey, address targetAddress);
        event ScopeAllowFunction(bytes32 roleKey, address targetAddress, bytes4 selector, uint8 options);
        event ScopeRevokeFunction(bytes32 roleKey, address targetAddress, bytes4 selector);
        event ScopeFunction(
            bytes32 roleKey,
            address targetAddress,
            bytes4 selector,
            ConditionFlat[] conditions,
            uint8 options
        );
        event ScopeFunctionExecutionOptions(bytes32 roleKey, address targetAddress, bytes4 selector, uint8 options);
        event ScopeParameter(
            bytes32 roleKey,
            address targetAddress,
            bytes4 selector,
            uint8 index,
            uint8 paramType,
            uint8 operator,
            bytes compValue
        );
        event ScopeParameterAsOneOf(
            bytes32 roleKey,
            address targetAddress,
            bytes4 selector,
            uint8 index,
            uint8 paramType,
            bytes[] compValues
        );
        event UnscopeParameter(bytes32 roleKey, address targetAddress, bytes4 selector, uint8 index);

        error NotOwner(address sender);
        error MalformedCall();
        error NoMembership();
        error NoDefaultRole();
        error ConditionViolation(uint8 status);
        error ModuleTransactionFailed();
        error ArraysDifferentLength();
        error UnsuitableOneOfComparison();
        error UnsuitableRelativeComparison();
        error NotEnoughCompValuesForOneOf();
        error TooManyConditions();
        error UnsuitableRootNode();
        error NotBFS();
        error UnsuitableParent(uint256 index);
        error UnsuitableChildCount(uint256 index);
        error UnsupportedOperator(uint256 index);
        error UnsuitableCompValue(uint256 index);
        error UnsuitableParameterType(uint256 index);
    }

    interface IMultiSend {
        function multiSend(bytes transactions) external payable;
    }
}
