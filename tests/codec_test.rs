//! Codec Integration Tests
//!
//! Exercises the canonical encoding of DID wallet state: round trips,
//! determinism, and rejection of truncated, mistagged or padded input.
//!
//! Run with: cargo test --test codec_test -- --nocapture

use did_state::{
    decode, encode, validate, Bytes, Bytes32, Coin, DecodeError, IdentityWalletState,
    LineageProof, Program, TAG_ABSENT, TAG_PRESENT,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Helper Functions
// ============================================================================

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_coin(seed: u8, amount: u64) -> Coin {
    Coin::new(
        Bytes32::new([seed; 32]),
        Bytes32::new([seed.wrapping_add(1); 32]),
        amount,
    )
}

fn test_lineage(seed: u8) -> LineageProof {
    LineageProof {
        parent_name: Bytes32::new([seed; 32]),
        inner_puzzle_hash: Bytes32::new([seed.wrapping_mul(3); 32]),
        amount: 1,
    }
}

/// A record with every optional field present and non-empty sequences
fn full_state() -> IdentityWalletState {
    IdentityWalletState {
        origin_coin: Some(test_coin(0x10, 1)),
        backup_ids: vec![
            Bytes::from(vec![0xb1; 32]),
            Bytes::from(vec![0xb2; 32]),
            Bytes::default(),
        ],
        recovery_threshold: 2,
        parent_history: vec![
            (Bytes32::new([0x21; 32]), Some(test_lineage(0x21))),
            (Bytes32::new([0x22; 32]), None),
            (Bytes32::new([0x23; 32]), Some(test_lineage(0x23))),
        ],
        current_inner_program: Some(Program::from_bytes(vec![0xff, 0x02, 0x80])),
        pending_recovery_coin: Some(test_coin(0x30, 1_000_000)),
        pending_recovery_puzzle_hash: Some(Bytes32::new([0x31; 32])),
        pending_recovery_pubkey: Some(Bytes::from(vec![0x32; 48])),
    }
}

fn random_bytes(rng: &mut StdRng, max_len: usize) -> Bytes {
    let len = rng.gen_range(0..=max_len);
    Bytes::from((0..len).map(|_| rng.gen::<u8>()).collect::<Vec<u8>>())
}

fn random_coin(rng: &mut StdRng) -> Coin {
    Coin::new(
        Bytes32::new(rng.gen()),
        Bytes32::new(rng.gen()),
        rng.gen(),
    )
}

/// Random but structurally valid record
fn random_state(rng: &mut StdRng) -> IdentityWalletState {
    let backup_ids: Vec<Bytes> = (0..rng.gen_range(0..5))
        .map(|_| random_bytes(rng, 40))
        .collect();
    let recovery_threshold = rng.gen_range(0..=backup_ids.len() as u64);
    let parent_history = (0..rng.gen_range(0..6))
        .map(|_| {
            let lineage = rng.gen_bool(0.5).then(|| LineageProof {
                parent_name: Bytes32::new(rng.gen()),
                inner_puzzle_hash: Bytes32::new(rng.gen()),
                amount: rng.gen(),
            });
            (Bytes32::new(rng.gen()), lineage)
        })
        .collect();
    let recovering = rng.gen_bool(0.3);

    IdentityWalletState {
        origin_coin: rng.gen_bool(0.7).then(|| random_coin(rng)),
        backup_ids,
        recovery_threshold,
        parent_history,
        current_inner_program: rng
            .gen_bool(0.6)
            .then(|| Program::from_bytes(random_bytes(rng, 200).into_inner())),
        pending_recovery_coin: recovering.then(|| random_coin(rng)),
        pending_recovery_puzzle_hash: recovering.then(|| Bytes32::new(rng.gen())),
        pending_recovery_pubkey: recovering.then(|| random_bytes(rng, 48)),
    }
}

/// Offsets of every presence tag in the encoding of `state`
fn tag_offsets(state: &IdentityWalletState) -> Vec<usize> {
    const COIN: usize = 72;
    let mut offsets = Vec::new();
    let mut pos = 0;

    offsets.push(pos);
    pos += 1 + state.origin_coin.map_or(0, |_| COIN);

    pos += 4 + state.backup_ids.iter().map(|id| 4 + id.len()).sum::<usize>();
    pos += 8;

    pos += 4;
    for (_, lineage) in &state.parent_history {
        pos += 32;
        offsets.push(pos);
        pos += 1 + lineage.map_or(0, |_| COIN);
    }

    offsets.push(pos);
    pos += 1 + state
        .current_inner_program
        .as_ref()
        .map_or(0, |p| 4 + p.len());

    offsets.push(pos);
    pos += 1 + state.pending_recovery_coin.map_or(0, |_| COIN);

    offsets.push(pos);
    pos += 1 + state.pending_recovery_puzzle_hash.map_or(0, |_| 32);

    offsets.push(pos);
    pos += 1 + state
        .pending_recovery_pubkey
        .as_ref()
        .map_or(0, |k| 4 + k.len());

    assert_eq!(pos, encode(state).len(), "offset model out of sync");
    offsets
}

// ============================================================================
// Tests
// ============================================================================

/// Test 1: A fully populated record survives encode -> decode unchanged
#[test]
fn test_full_state_round_trip() -> anyhow::Result<()> {
    init_logging();
    let state = full_state();

    let bytes = encode(&state);
    let decoded = decode(&bytes)?;

    assert_eq!(decoded, state);
    validate(&decoded)?;

    Ok(())
}

/// Test 2: Varied records round-trip and re-encode to the same bytes
#[test]
fn test_random_states_round_trip() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for i in 0..64 {
        let state = random_state(&mut rng);
        let bytes = encode(&state);
        let decoded = decode(&bytes)
            .unwrap_or_else(|e| panic!("state #{} failed to decode: {}", i, e));

        assert_eq!(decoded, state, "state #{} changed in round trip", i);
        assert_eq!(encode(&decoded), bytes, "state #{} re-encoded differently", i);
    }
}

/// Test 3: Encoding the same logical state twice yields identical bytes
#[test]
fn test_encoding_is_deterministic() {
    let state = full_state();
    let copy = state.clone();

    assert_eq!(encode(&state), encode(&state));
    assert_eq!(encode(&state), encode(&copy));
}

/// Test 4: Every strict prefix of an encoding is reported as truncated
#[test]
fn test_every_prefix_is_truncated() {
    let bytes = encode(&full_state());

    for len in 0..bytes.len() {
        match decode(&bytes[..len]) {
            Err(DecodeError::Truncated { .. }) => {}
            other => panic!("prefix of {} bytes: expected Truncated, got {:?}", len, other),
        }
    }
}

/// Test 5: The all-empty record is also truncation-safe
#[test]
fn test_empty_state_prefixes_are_truncated() {
    let bytes = encode(&IdentityWalletState::default());
    assert_eq!(bytes.len(), 21);

    for len in 0..bytes.len() {
        assert!(
            matches!(decode(&bytes[..len]), Err(DecodeError::Truncated { .. })),
            "prefix of {} bytes should be truncated",
            len
        );
    }
}

/// Test 6: Any presence tag other than 0x00/0x01 is rejected
#[test]
fn test_corrupted_tags_are_rejected() {
    for state in [full_state(), IdentityWalletState::default()] {
        let bytes = encode(&state);

        for offset in tag_offsets(&state) {
            assert!(
                bytes[offset] == TAG_ABSENT || bytes[offset] == TAG_PRESENT,
                "offset {} is not a tag",
                offset
            );

            for bad in [0x02u8, 0x7f, 0xff] {
                let mut corrupted = bytes.clone();
                corrupted[offset] = bad;

                match decode(&corrupted) {
                    Err(DecodeError::InvalidTag { tag, .. }) => assert_eq!(tag, bad),
                    other => panic!(
                        "tag at offset {} set to 0x{:02x}: expected InvalidTag, got {:?}",
                        offset, bad, other
                    ),
                }
            }
        }
    }
}

/// Test 7: The error names the field whose tag was corrupted
#[test]
fn test_invalid_tag_names_field() {
    let state = full_state();
    let offsets = tag_offsets(&state);
    let mut bytes = encode(&state);

    let pubkey_tag = *offsets.last().unwrap();
    bytes[pubkey_tag] = 0x05;

    assert_eq!(
        decode(&bytes),
        Err(DecodeError::InvalidTag {
            field: "pending_recovery_pubkey",
            tag: 0x05
        })
    );
}

/// Test 8: Bytes after the last field are rejected
#[test]
fn test_trailing_data_is_rejected() {
    let mut bytes = encode(&full_state());
    bytes.extend_from_slice(&[0x00, 0x01, 0x02]);

    assert_eq!(
        decode(&bytes),
        Err(DecodeError::TrailingData { remaining: 3 })
    );
}

/// Test 9: Absent and zero-valued are distinct on the wire
#[test]
fn test_absent_differs_from_empty_value() {
    let absent = IdentityWalletState::default();
    let empty_program = IdentityWalletState {
        current_inner_program: Some(Program::from_bytes(Vec::new())),
        ..Default::default()
    };

    let a = encode(&absent);
    let b = encode(&empty_program);
    assert_ne!(a, b);
    assert_eq!(decode(&b).unwrap(), empty_program);
}

/// Test 10: Parent history order is preserved exactly
#[test]
fn test_parent_history_order_preserved() {
    let ids: Vec<Bytes32> = [9u8, 3, 7, 1].iter().map(|s| Bytes32::new([*s; 32])).collect();
    let state = IdentityWalletState {
        parent_history: ids.iter().map(|id| (*id, None)).collect(),
        ..Default::default()
    };

    let decoded = decode(&encode(&state)).unwrap();
    let decoded_ids: Vec<Bytes32> = decoded.parent_history.iter().map(|(id, _)| *id).collect();
    assert_eq!(decoded_ids, ids);
}

/// Test 11: A freshly provisioned wallet goes through encode -> decode -> validate
#[test]
fn test_fresh_wallet_end_to_end() -> anyhow::Result<()> {
    init_logging();
    let state = IdentityWalletState {
        origin_coin: None,
        backup_ids: vec![],
        recovery_threshold: 0,
        parent_history: vec![],
        current_inner_program: None,
        pending_recovery_coin: None,
        pending_recovery_puzzle_hash: None,
        pending_recovery_pubkey: None,
    };

    let bytes = encode(&state);
    let decoded = decode(&bytes)?;

    assert_eq!(validate(&decoded), Ok(()));
    assert_eq!(decoded, state);

    Ok(())
}

/// Test 12: JSON view renders byte values as hex
#[test]
fn test_json_view_uses_hex() -> anyhow::Result<()> {
    let state = full_state();
    let json = serde_json::to_value(&state)?;

    assert_eq!(json["backup_ids"][0], "b1".repeat(32));
    assert_eq!(json["current_inner_program"], "ff0280");
    assert_eq!(
        json["origin_coin"]["parent_coin_info"],
        "10".repeat(32)
    );

    let back: IdentityWalletState = serde_json::from_value(json)?;
    assert_eq!(back, state);

    Ok(())
}
