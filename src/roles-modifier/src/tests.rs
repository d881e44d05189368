use alloy_primitives::{address, b256, Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolError, SolValue};
use roles_types::{
    interfaces::{IMultiSend, IRoles},
    Avatar, ConditionFlat, ExecutionOptions, Operation, Operator, ParameterType, PolicyMutation, RoleKey, Selector,
};

use crate::{
    errors::{ConditionFailure, DispatchError, GovernanceError, PermissionError},
    events::RolesEvent,
    roles::{Roles, RolesConfig, TransactionRequest},
};

sol! {
    function mint(address to, uint256 amount) external;
    function testDynamic(
        string test,
        uint256 test2,
        string test3,
        bool test4,
        uint8 test5,
        string test6,
        string test7
    ) external;
    function doNothing() external;
    function setLabel(string label) external;
}

const OWNER: Address = address!("00000000000000000000000000000000000000b0");
const INVOKER: Address = address!("0000000000000000000000000000000000000a11");
const STRANGER: Address = address!("0000000000000000000000000000000000000bad");
const TARGET: Address = address!("00000000000000000000000000000000000000f1");
const OTHER_TARGET: Address = address!("00000000000000000000000000000000000000f2");
const MULTISEND: Address = address!("0000000000000000000000000000000000000a55");
const USER: Address = address!("00000000000000000000000000000000000000a1");

const ROLE_1: RoleKey = b256!("0000000000000000000000000000000000000000000000000000000000000001");
const ROLE_2: RoleKey = b256!("0000000000000000000000000000000000000000000000000000000000000002");

const LONG_STRING: &str = "This is an input that is larger than 32 bytes and must be scanned for correctness";

/// Records forwarded calls; fails every call while `fail` is set.
#[derive(Debug, Default)]
struct TestAvatar {
    calls: Vec<(Address, U256, Bytes, Operation)>,
    fail: bool,
}

impl Avatar for TestAvatar {
    fn exec_transaction_from_module_return_data(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> (bool, Bytes) {
        self.calls.push((to, value, Bytes::copy_from_slice(data), operation));
        if self.fail {
            (false, Bytes::from_static(b"reverted"))
        } else {
            (true, Bytes::copy_from_slice(to.as_slice()))
        }
    }
}

fn modifier() -> Roles<TestAvatar> {
    Roles::new(RolesConfig { owner: OWNER, multisend: Some(MULTISEND) }, TestAvatar::default())
}

/// Modifier where `INVOKER` holds `ROLE_1` as its default role.
fn modifier_with_member() -> Roles<TestAvatar> {
    let mut roles = modifier();
    roles
        .apply(OWNER, PolicyMutation::AssignRoles { module: INVOKER, role_keys: vec![ROLE_1], member_of: vec![true] })
        .unwrap();
    roles.apply(OWNER, PolicyMutation::SetDefaultRole { module: INVOKER, role_key: ROLE_1 }).unwrap();
    roles
}

fn static_value(value: impl SolValue) -> Bytes {
    value.abi_encode().into()
}

fn dynamic_value(value: &str) -> Bytes {
    value.to_string().abi_encode().into()
}

fn node(param_type: ParameterType, operator: Operator, comp_value: Bytes) -> ConditionFlat {
    ConditionFlat::new(0, param_type, operator, comp_value)
}

fn mint_data(to: Address, amount: u64) -> Vec<u8> {
    mintCall { to, amount: U256::from(amount) }.abi_encode()
}

fn exec(roles: &mut Roles<TestAvatar>, to: Address, value: u64, data: &[u8]) -> Result<bool, DispatchError> {
    roles.exec_transaction_from_module(INVOKER, to, U256::from(value), data, Operation::Call)
}

fn violation(err: PermissionError) -> DispatchError {
    DispatchError::ConditionViolation(err)
}

fn scope_mint(roles: &mut Roles<TestAvatar>) {
    roles.apply(OWNER, PolicyMutation::ScopeTarget { role_key: ROLE_1, target_address: TARGET }).unwrap();
    roles
        .apply(
            OWNER,
            PolicyMutation::ScopeFunction {
                role_key: ROLE_1,
                target_address: TARGET,
                selector: Selector::from(mintCall::SELECTOR),
                conditions: vec![
                    node(ParameterType::Calldata, Operator::Matches, Bytes::new()),
                    node(ParameterType::Static, Operator::EqualTo, static_value(USER)),
                    node(ParameterType::Static, Operator::EqualTo, static_value(U256::from(99))),
                ],
                options: ExecutionOptions::None,
            },
        )
        .unwrap();
}

#[test]
fn selectors_match_the_test_contract() {
    assert_eq!(mintCall::SELECTOR, [0x40, 0xc1, 0x0f, 0x19]);
    assert_eq!(testDynamicCall::SELECTOR, [0x27, 0x34, 0x54, 0xbf]);
}

#[test]
fn invokers_without_roles_have_no_membership() {
    let mut roles = modifier();
    roles.apply(OWNER, PolicyMutation::AllowTarget {
        role_key: ROLE_1,
        target_address: TARGET,
        options: ExecutionOptions::Both,
    })
    .unwrap();

    assert_eq!(exec(&mut roles, TARGET, 0, &[]), Err(DispatchError::NoMembership));
    assert_eq!(
        roles.exec_transaction_with_role(INVOKER, TARGET, U256::ZERO, &[], Operation::Call, ROLE_1, false),
        Err(DispatchError::NoMembership)
    );
    assert!(roles.avatar().calls.is_empty());
}

#[test]
fn unknown_targets_are_rejected_whatever_the_calldata() {
    let mut roles = modifier_with_member();
    for data in [vec![], vec![0x12], mint_data(USER, 99), vec![0xff; 100]] {
        assert_eq!(exec(&mut roles, TARGET, 0, &data), Err(violation(PermissionError::TargetAddressNotAllowed)));
    }
    assert!(roles.avatar().calls.is_empty());
}

#[test]
fn mint_scenario() {
    let mut roles = modifier_with_member();
    scope_mint(&mut roles);

    assert_eq!(exec(&mut roles, TARGET, 0, &mint_data(USER, 99)), Ok(true));

    let err = exec(&mut roles, TARGET, 0, &mint_data(USER, 98)).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::ConditionViolation(PermissionError::ParameterNotAllowed(ConditionFailure::Comparison {
            node: 2,
            operator: Operator::EqualTo,
        }))
    ));

    assert_eq!(
        exec(&mut roles, TARGET, 0, &doNothingCall {}.abi_encode()),
        Err(violation(PermissionError::FunctionNotAllowed))
    );
    assert_eq!(roles.avatar().calls.len(), 1);
}

#[test]
fn dynamic_parameters_are_compared_in_full() {
    let mut roles = modifier_with_member();
    roles.apply(OWNER, PolicyMutation::ScopeTarget { role_key: ROLE_1, target_address: TARGET }).unwrap();
    roles
        .apply(
            OWNER,
            PolicyMutation::ScopeFunction {
                role_key: ROLE_1,
                target_address: TARGET,
                selector: Selector::from(testDynamicCall::SELECTOR),
                conditions: vec![
                    node(ParameterType::Calldata, Operator::Matches, Bytes::new()),
                    node(ParameterType::Dynamic, Operator::EqualTo, dynamic_value("This is a dynamic array")),
                    node(ParameterType::Static, Operator::EqualTo, static_value(U256::from(4))),
                    node(ParameterType::Dynamic, Operator::EqualTo, dynamic_value("Test")),
                    node(ParameterType::Static, Operator::EqualTo, static_value(true)),
                    node(ParameterType::Static, Operator::EqualTo, static_value(U256::from(3u8))),
                    node(ParameterType::Dynamic, Operator::EqualTo, dynamic_value("weeeeeeee")),
                    node(ParameterType::Dynamic, Operator::EqualTo, dynamic_value(LONG_STRING)),
                ],
                options: ExecutionOptions::None,
            },
        )
        .unwrap();

    let call = |first: &str, last: &str| {
        testDynamicCall {
            test: first.to_string(),
            test2: U256::from(4),
            test3: "Test".to_string(),
            test4: true,
            test5: 3,
            test6: "weeeeeeee".to_string(),
            test7: last.to_string(),
        }
        .abi_encode()
    };

    assert_eq!(exec(&mut roles, TARGET, 0, &call("This is a dynamic array", LONG_STRING)), Ok(true));

    let err = exec(&mut roles, TARGET, 0, &call("This is a dynamic array that is not allowed", LONG_STRING));
    assert!(matches!(err, Err(DispatchError::ConditionViolation(PermissionError::ParameterNotAllowed(_)))));

    // differs only past the first 32 bytes
    let tail_changed = LONG_STRING.replace("correctness", "correctnesS");
    let err = exec(&mut roles, TARGET, 0, &call("This is a dynamic array", &tail_changed));
    assert!(matches!(
        err,
        Err(DispatchError::ConditionViolation(PermissionError::ParameterNotAllowed(
            ConditionFailure::Comparison { node: 7, .. }
        )))
    ));
}

#[test]
fn send_permission_scenario() {
    let mut roles = modifier_with_member();
    roles
        .apply(OWNER, PolicyMutation::AllowTarget {
            role_key: ROLE_1,
            target_address: TARGET,
            options: ExecutionOptions::None,
        })
        .unwrap();
    assert_eq!(exec(&mut roles, TARGET, 1, &[]), Err(violation(PermissionError::SendNotAllowed)));

    roles
        .apply(OWNER, PolicyMutation::AllowTarget {
            role_key: ROLE_1,
            target_address: TARGET,
            options: ExecutionOptions::Send,
        })
        .unwrap();
    assert_eq!(exec(&mut roles, TARGET, 1, &[]), Ok(true));
    assert_eq!(roles.avatar().calls[0].1, U256::from(1));
}

#[test]
fn delegate_calls_need_permission() {
    let mut roles = modifier_with_member();
    roles
        .apply(OWNER, PolicyMutation::AllowTarget {
            role_key: ROLE_1,
            target_address: TARGET,
            options: ExecutionOptions::Send,
        })
        .unwrap();
    assert_eq!(
        roles.exec_transaction_from_module(INVOKER, TARGET, U256::ZERO, &[], Operation::DelegateCall),
        Err(violation(PermissionError::DelegateCallNotAllowed))
    );
}

#[test]
fn explicit_and_default_roles() {
    let mut roles = modifier();
    roles
        .apply(OWNER, PolicyMutation::AssignRoles {
            module: INVOKER,
            role_keys: vec![ROLE_1, ROLE_2],
            member_of: vec![true, true],
        })
        .unwrap();
    roles
        .apply(OWNER, PolicyMutation::AllowTarget {
            role_key: ROLE_2,
            target_address: TARGET,
            options: ExecutionOptions::None,
        })
        .unwrap();

    assert_eq!(exec(&mut roles, TARGET, 0, &[]), Err(DispatchError::NoDefaultRole));
    assert_eq!(
        roles.exec_transaction_with_role(INVOKER, TARGET, U256::ZERO, &[], Operation::Call, ROLE_2, false),
        Ok(true)
    );
    assert_eq!(
        roles.exec_transaction_with_role(INVOKER, TARGET, U256::ZERO, &[], Operation::Call, ROLE_1, false),
        Err(violation(PermissionError::TargetAddressNotAllowed))
    );

    roles.apply(OWNER, PolicyMutation::SetDefaultRole { module: INVOKER, role_key: ROLE_1 }).unwrap();
    assert_eq!(exec(&mut roles, TARGET, 0, &[]), Err(violation(PermissionError::TargetAddressNotAllowed)));

    roles.apply(OWNER, PolicyMutation::SetDefaultRole { module: INVOKER, role_key: ROLE_2 }).unwrap();
    assert_eq!(exec(&mut roles, TARGET, 0, &[]), Ok(true));
}

#[test]
fn reverted_inner_calls() {
    let mut roles = modifier_with_member();
    roles
        .apply(OWNER, PolicyMutation::AllowTarget {
            role_key: ROLE_1,
            target_address: TARGET,
            options: ExecutionOptions::None,
        })
        .unwrap();
    roles.avatar_mut().fail = true;

    assert_eq!(exec(&mut roles, TARGET, 0, &[]), Ok(false));
    assert_eq!(
        roles.exec_transaction_with_role(INVOKER, TARGET, U256::ZERO, &[], Operation::Call, ROLE_1, false),
        Ok(false)
    );
    assert_eq!(
        roles.exec_transaction_with_role(INVOKER, TARGET, U256::ZERO, &[], Operation::Call, ROLE_1, true),
        Err(DispatchError::ModuleTransactionFailed)
    );
    assert_eq!(
        roles.exec_transaction_with_role_return_data(INVOKER, TARGET, U256::ZERO, &[], Operation::Call, ROLE_1, false),
        Ok((false, Bytes::from_static(b"reverted")))
    );
}

#[test]
fn return_data_is_propagated() {
    let mut roles = modifier_with_member();
    roles
        .apply(OWNER, PolicyMutation::AllowTarget {
            role_key: ROLE_1,
            target_address: TARGET,
            options: ExecutionOptions::None,
        })
        .unwrap();
    let (success, data) =
        roles.exec_transaction_from_module_return_data(INVOKER, TARGET, U256::ZERO, &[], Operation::Call).unwrap();
    assert!(success);
    assert_eq!(data.as_ref(), TARGET.as_slice());
}

fn pack(entries: &[(Operation, Address, u64, Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (op, to, value, data) in entries {
        out.push(*op as u8);
        out.extend_from_slice(to.as_slice());
        out.extend_from_slice(&U256::from(*value).to_be_bytes::<32>());
        out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
        out.extend_from_slice(data);
    }
    out
}

fn multisend_data(entries: &[(Operation, Address, u64, Vec<u8>)]) -> Vec<u8> {
    IMultiSend::multiSendCall { transactions: pack(entries).into() }.abi_encode()
}

#[test]
fn multisend_offset_boundary() {
    let mut roles = modifier_with_member();
    scope_mint(&mut roles);

    let data = multisend_data(&[(Operation::Call, TARGET, 0, mint_data(USER, 99))]);
    assert_eq!(
        roles.exec_transaction_from_module(INVOKER, MULTISEND, U256::ZERO, &data, Operation::DelegateCall),
        Ok(true)
    );

    let mut shifted = data.clone();
    shifted[4 + 31] = 33;
    assert_eq!(
        roles.exec_transaction_from_module(INVOKER, MULTISEND, U256::ZERO, &shifted, Operation::DelegateCall),
        Err(violation(PermissionError::UnacceptableMultiSendOffset))
    );
    assert_eq!(roles.avatar().calls.len(), 1);
    assert_eq!(roles.avatar().calls[0].0, MULTISEND);
}

#[test]
fn multisend_cannot_smuggle_disallowed_calls() {
    let mut roles = modifier_with_member();
    scope_mint(&mut roles);

    let data = multisend_data(&[
        (Operation::Call, TARGET, 0, mint_data(USER, 99)),
        (Operation::Call, TARGET, 0, mint_data(USER, 1_000_000)),
    ]);
    let err = roles.exec_transaction_from_module(INVOKER, MULTISEND, U256::ZERO, &data, Operation::DelegateCall);
    assert!(matches!(err, Err(DispatchError::ConditionViolation(PermissionError::ParameterNotAllowed(_)))));

    let data = multisend_data(&[
        (Operation::Call, TARGET, 0, mint_data(USER, 99)),
        (Operation::Call, OTHER_TARGET, 0, vec![]),
    ]);
    assert_eq!(
        roles.exec_transaction_from_module(INVOKER, MULTISEND, U256::ZERO, &data, Operation::DelegateCall),
        Err(violation(PermissionError::TargetAddressNotAllowed))
    );
    assert!(roles.avatar().calls.is_empty());
}

#[test]
fn plain_calls_to_the_multisend_address_are_not_unrolled() {
    let mut roles = modifier_with_member();
    scope_mint(&mut roles);
    let data = multisend_data(&[(Operation::Call, TARGET, 0, mint_data(USER, 99))]);
    assert_eq!(exec(&mut roles, MULTISEND, 0, &data), Err(violation(PermissionError::TargetAddressNotAllowed)));
}

#[test]
fn unscoping_every_parameter_disallows_the_function() {
    let mut roles = modifier_with_member();
    let selector = Selector::from(mintCall::SELECTOR);
    roles.apply(OWNER, PolicyMutation::ScopeTarget { role_key: ROLE_1, target_address: TARGET }).unwrap();
    roles
        .apply(OWNER, PolicyMutation::ScopeAllowFunction {
            role_key: ROLE_1,
            target_address: TARGET,
            selector,
            options: ExecutionOptions::None,
        })
        .unwrap();
    roles
        .apply(OWNER, PolicyMutation::ScopeParameter {
            role_key: ROLE_1,
            target_address: TARGET,
            selector,
            index: 1,
            param_type: ParameterType::Static,
            operator: Operator::LessThan,
            comp_value: static_value(U256::from(100)),
        })
        .unwrap();
    assert_eq!(exec(&mut roles, TARGET, 0, &mint_data(Address::ZERO, 50)), Ok(true));
    assert!(exec(&mut roles, TARGET, 0, &mint_data(Address::ZERO, 500)).is_err());

    roles
        .apply(OWNER, PolicyMutation::UnscopeParameter { role_key: ROLE_1, target_address: TARGET, selector, index: 1 })
        .unwrap();
    assert_eq!(
        exec(&mut roles, TARGET, 0, &mint_data(Address::ZERO, 500)),
        Err(violation(PermissionError::FunctionNotAllowed))
    );
}

#[test]
fn one_of_parameters() {
    let mut roles = modifier_with_member();
    let selector = Selector::from(setLabelCall::SELECTOR);
    roles.apply(OWNER, PolicyMutation::ScopeTarget { role_key: ROLE_1, target_address: TARGET }).unwrap();
    roles
        .apply(OWNER, PolicyMutation::ScopeParameterAsOneOf {
            role_key: ROLE_1,
            target_address: TARGET,
            selector,
            index: 0,
            param_type: ParameterType::Dynamic,
            comp_values: vec![dynamic_value("treasury"), dynamic_value(LONG_STRING)],
        })
        .unwrap();

    let label = |label: &str| setLabelCall { label: label.to_string() }.abi_encode();
    assert_eq!(exec(&mut roles, TARGET, 0, &label("treasury")), Ok(true));
    assert_eq!(exec(&mut roles, TARGET, 0, &label(LONG_STRING)), Ok(true));
    assert_eq!(
        exec(&mut roles, TARGET, 0, &label("payroll")),
        Err(violation(PermissionError::ParameterNotAllowed(ConditionFailure::Comparison {
            node: 1,
            operator: Operator::OneOf,
        })))
    );
}

#[test]
fn one_of_rejected_on_static_parameters() {
    let mut roles = modifier_with_member();
    let selector = Selector::from(mintCall::SELECTOR);
    roles.apply(OWNER, PolicyMutation::ScopeTarget { role_key: ROLE_1, target_address: TARGET }).unwrap();
    let before = roles.store().effective();
    let events = roles.events().len();

    let mutation = PolicyMutation::ScopeParameterAsOneOf {
        role_key: ROLE_1,
        target_address: TARGET,
        selector,
        index: 0,
        param_type: ParameterType::Static,
        comp_values: vec![static_value(USER), static_value(OTHER_TARGET)],
    };
    assert_eq!(roles.apply(OWNER, mutation.clone()), Err(GovernanceError::UnsuitableOneOfComparison));
    assert_eq!(
        roles.apply_calldata(OWNER, &mutation.abi_encode()),
        Err(GovernanceError::UnsuitableOneOfComparison)
    );
    assert_eq!(roles.store().effective(), before);
    assert_eq!(roles.events().len(), events);
    assert_eq!(
        exec(&mut roles, TARGET, 0, &mint_data(USER, 1)),
        Err(violation(PermissionError::FunctionNotAllowed))
    );
}

#[test]
fn governance_is_owner_only() {
    let mut roles = modifier();
    let mutation = PolicyMutation::AllowTarget {
        role_key: ROLE_1,
        target_address: TARGET,
        options: ExecutionOptions::None,
    };
    assert_eq!(roles.apply(STRANGER, mutation.clone()), Err(GovernanceError::NotOwner(STRANGER)));
    assert_eq!(roles.transfer_ownership(STRANGER, STRANGER), Err(GovernanceError::NotOwner(STRANGER)));
    assert!(roles.store().effective().is_empty());
    assert!(roles.events().is_empty());

    roles.transfer_ownership(OWNER, STRANGER).unwrap();
    assert_eq!(roles.apply(OWNER, mutation.clone()), Err(GovernanceError::NotOwner(OWNER)));
    roles.apply(STRANGER, mutation).unwrap();
    assert_eq!(roles.events().len(), 2);
}

#[test]
fn governance_calldata_validation() {
    let mut roles = modifier();
    let selector = Selector::from(mintCall::SELECTOR);

    let mismatched = IRoles::assignRolesCall { module: INVOKER, roleKeys: vec![ROLE_1], memberOf: vec![true, false] };
    assert_eq!(roles.apply_calldata(OWNER, &mismatched.abi_encode()), Err(GovernanceError::ArraysDifferentLength));

    let one_of_via_scope_function = IRoles::scopeFunctionCall {
        roleKey: ROLE_1,
        targetAddress: TARGET,
        selector,
        conditions: vec![
            node(ParameterType::Calldata, Operator::Matches, Bytes::new()).into(),
            node(ParameterType::Static, Operator::OneOf, static_value(USER)).into(),
        ],
        options: 0,
    };
    assert_eq!(
        roles.apply_calldata(OWNER, &one_of_via_scope_function.abi_encode()),
        Err(GovernanceError::UnsuitableOneOfComparison)
    );

    let relative_on_dynamic = IRoles::scopeParameterCall {
        roleKey: ROLE_1,
        targetAddress: TARGET,
        selector,
        index: 0,
        paramType: ParameterType::Dynamic as u8,
        operator: Operator::GreaterThan as u8,
        compValue: static_value(U256::from(1)),
    };
    assert_eq!(
        roles.apply_calldata(OWNER, &relative_on_dynamic.abi_encode()),
        Err(GovernanceError::UnsuitableRelativeComparison)
    );

    let bad_options = IRoles::allowTargetCall { roleKey: ROLE_1, targetAddress: TARGET, options: 9 };
    assert_eq!(roles.apply_calldata(OWNER, &bad_options.abi_encode()), Err(GovernanceError::MalformedCall));
    assert_eq!(roles.apply_calldata(OWNER, &[0xde, 0xad, 0xbe, 0xef]), Err(GovernanceError::MalformedCall));

    assert!(roles.store().effective().is_empty());
    assert!(roles.memberships().assignment(&INVOKER).is_none());
    assert!(roles.events().is_empty());
}

#[test]
fn governance_events_are_recorded() {
    let mut roles = modifier();
    let set_multisend = PolicyMutation::SetMultisend { multisend: OTHER_TARGET };
    roles.apply(OWNER, set_multisend.clone()).unwrap();
    assert_eq!(roles.multisend(), Some(OTHER_TARGET));

    let call = IRoles::transferOwnershipCall { newOwner: STRANGER };
    roles.apply_calldata(OWNER, &call.abi_encode()).unwrap();
    assert_eq!(roles.owner(), STRANGER);

    let events = roles.take_events();
    assert_eq!(
        events,
        vec![
            RolesEvent::Mutation(set_multisend),
            RolesEvent::OwnershipTransferred { previous_owner: OWNER, new_owner: STRANGER },
        ]
    );
    assert!(roles.events().is_empty());
}

#[test]
fn idempotent_allow_and_revoke_round_trip() {
    let allow = PolicyMutation::AllowTarget {
        role_key: ROLE_1,
        target_address: TARGET,
        options: ExecutionOptions::Send,
    };

    let mut once = modifier();
    once.apply(OWNER, allow.clone()).unwrap();
    let mut twice = modifier();
    twice.apply(OWNER, allow.clone()).unwrap();
    twice.apply(OWNER, allow.clone()).unwrap();
    assert_eq!(once.store(), twice.store());

    let mut revoked = modifier_with_member();
    revoked.apply(OWNER, allow).unwrap();
    revoked
        .apply(OWNER, PolicyMutation::RevokeTarget { role_key: ROLE_1, target_address: TARGET })
        .unwrap();
    assert_eq!(revoked.store().effective(), modifier().store().effective());
    assert_eq!(exec(&mut revoked, TARGET, 0, &[]), Err(violation(PermissionError::TargetAddressNotAllowed)));
}

#[test]
fn contract_style_entry_point() {
    let mut roles = modifier();
    let governance = [
        IRoles::assignRolesCall { module: INVOKER, roleKeys: vec![ROLE_1], memberOf: vec![true] }.abi_encode(),
        IRoles::allowTargetCall { roleKey: ROLE_1, targetAddress: TARGET, options: 0 }.abi_encode(),
    ];
    for data in governance {
        assert_eq!(roles.handle_call(OWNER, &data), Ok(Bytes::new()));
    }

    let exec = IRoles::execTransactionWithRoleCall {
        to: TARGET,
        value: U256::from(1),
        data: Bytes::new(),
        operation: 0,
        roleKey: ROLE_1,
        shouldRevert: true,
    };
    let revert = roles.handle_call(INVOKER, &exec.abi_encode()).unwrap_err();
    let decoded = IRoles::ConditionViolation::abi_decode(&revert, true).unwrap();
    assert_eq!(decoded.status, PermissionError::SendNotAllowed.status_code());

    let exec = IRoles::execTransactionWithRoleCall { value: U256::ZERO, ..exec };
    let output = roles.handle_call(INVOKER, &exec.abi_encode()).unwrap();
    assert!(IRoles::execTransactionWithRoleCall::abi_decode_returns(&output, true).unwrap().success);

    let not_owner = roles.handle_call(INVOKER, &governance_call()).unwrap_err();
    assert!(IRoles::NotOwner::abi_decode(&not_owner, true).is_ok());
}

fn governance_call() -> Vec<u8> {
    IRoles::scopeTargetCall { roleKey: ROLE_1, targetAddress: TARGET }.abi_encode()
}

#[test]
fn authorization_happens_before_execution() {
    let mut roles = modifier_with_member();
    scope_mint(&mut roles);
    let request = TransactionRequest {
        to: TARGET,
        value: U256::ZERO,
        data: &mint_data(USER, 98),
        operation: Operation::Call,
        role: None,
        revert_on_failure: true,
        return_data: false,
    };
    assert!(roles.dispatch(INVOKER, &request).is_err());
    assert!(roles.avatar().calls.is_empty());
}

#[test]
fn config_from_json() {
    let config: RolesConfig = serde_json::from_str(
        r#"{ "owner": "0x00000000000000000000000000000000000000b0",
             "multisend": "0x0000000000000000000000000000000000000a55" }"#,
    )
    .unwrap();
    assert_eq!(config, RolesConfig { owner: OWNER, multisend: Some(MULTISEND) });

    let config: RolesConfig =
        serde_json::from_str(r#"{ "owner": "0x00000000000000000000000000000000000000b0" }"#).unwrap();
    assert_eq!(config.multisend, None);
}
