// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors
//
// #[derive(Layout)] on records and tagged unions: field offsets, fixed
// widths, filters, discriminators and registry routing.

use ledgerwire::{
    instruction_data, DecoderRegistry, Decode, Discriminated, Discriminator, Encode, Error,
    Filter, Identifier, Layout, TaggedUnion,
};

#[derive(Layout, Debug, Clone, PartialEq)]
#[layout(account)]
struct BondingCurve {
    virtual_token_reserves: i64,
    virtual_sol_reserves: i64,
    real_token_reserves: i64,
    real_sol_reserves: i64,
    token_total_supply: i64,
    complete: bool,
}

#[derive(Layout, Debug, Clone, Copy, PartialEq)]
enum Currency {
    Sol,
    Usdc,
}

#[derive(Layout, Debug, Clone, Copy, PartialEq)]
enum CurveType {
    ConstantProduct,
    Linear,
    Exponential,
}

#[derive(Layout, Debug, Clone, Copy, PartialEq)]
enum MigrationTarget {
    Raydium,
    Meteora,
}

#[derive(Layout, Debug, Clone, PartialEq)]
#[layout(account)]
struct CurveAccount {
    total_supply: u64,
    curve_amount: u64,
    mint: Identifier,
    decimals: u8,
    #[layout(fixed)]
    collateral_currency: Currency,
    #[layout(fixed)]
    curve_type: CurveType,
    marketcap_threshold: u64,
    #[layout(fixed)]
    marketcap_currency: Currency,
    migration_fee: u64,
    coef_b: u32,
    bump: u8,
    #[layout(fixed)]
    migration_target: MigrationTarget,
}

#[derive(Layout, Debug, Clone, PartialEq)]
#[layout(instruction)]
struct InitializeFarm {
    reward_mint: Identifier,
    name: String,
    weights: Vec<u16>,
    cap: Option<u64>,
    tiers: Vec<Vec<u8>>,
}

#[derive(Layout, Debug, Clone, PartialEq)]
enum Fee {
    Waived,
    Flat(u64),
    Tiered { bps: u16, cap: Option<u64> },
}

fn sample_curve() -> BondingCurve {
    BondingCurve {
        virtual_token_reserves: 1_073_000_000_000_000,
        virtual_sol_reserves: 30_000_000_000,
        real_token_reserves: 793_100_000_000_000,
        real_sol_reserves: 0,
        token_total_supply: 1_000_000_000_000_000,
        complete: false,
    }
}

fn sample_curve_account() -> CurveAccount {
    CurveAccount {
        total_supply: 1_000_000_000,
        curve_amount: 800_000_000,
        mint: Identifier::new([0x5A; 32]),
        decimals: 6,
        collateral_currency: Currency::Sol,
        curve_type: CurveType::Exponential,
        marketcap_threshold: 69_000,
        marketcap_currency: Currency::Usdc,
        migration_fee: 6_000_000,
        coef_b: 25,
        bump: 253,
        migration_target: MigrationTarget::Meteora,
    }
}

#[test]
fn bonding_curve_layout() {
    assert_eq!(BondingCurve::VIRTUAL_TOKEN_RESERVES_OFFSET, 8);
    assert_eq!(BondingCurve::VIRTUAL_SOL_RESERVES_OFFSET, 16);
    assert_eq!(BondingCurve::REAL_TOKEN_RESERVES_OFFSET, 24);
    assert_eq!(BondingCurve::REAL_SOL_RESERVES_OFFSET, 32);
    assert_eq!(BondingCurve::TOKEN_TOTAL_SUPPLY_OFFSET, 40);
    assert_eq!(BondingCurve::COMPLETE_OFFSET, 48);
    assert_eq!(BondingCurve::BYTES, Some(49));
    assert_eq!(<BondingCurve as Encode>::FIXED_LEN, Some(49));
    assert_eq!(<BondingCurve as Decode>::MIN_LEN, 49);

    let curve = sample_curve();
    let bytes = curve.to_vec().unwrap();
    assert_eq!(bytes.len(), curve.encoded_len());
    assert_eq!(&bytes[..8], BondingCurve::DISCRIMINATOR.as_bytes());
    assert_eq!(&bytes[16..24], &30_000_000_000i64.to_le_bytes());
    assert_eq!(bytes[48], 0);

    let (decoded, used) = BondingCurve::read_at(&bytes, 0).unwrap();
    assert_eq!(decoded, curve);
    assert_eq!(used, 49);
}

#[test]
fn bonding_curve_filters() {
    let curve = sample_curve();
    let bytes = curve.to_vec().unwrap();

    assert_eq!(BondingCurve::record_size_filter(), Some(Filter::DataSize(49)));
    assert!(BondingCurve::record_discriminator_filter().matches(&bytes));
    assert_eq!(
        BondingCurve::record_discriminator_filter(),
        Filter::memcmp(0, [23u8, 183, 248, 55, 96, 216, 172, 96]).unwrap()
    );
    assert!(BondingCurve::complete_filter(&false).unwrap().matches(&bytes));
    assert!(!BondingCurve::complete_filter(&true).unwrap().matches(&bytes));
    assert_eq!(
        BondingCurve::real_sol_reserves_filter(&0).unwrap(),
        Filter::Memcmp {
            offset: 32,
            bytes: vec![0; 8]
        }
    );
}

#[test]
fn curve_account_offsets_through_unit_enums() {
    assert_eq!(<Currency as Encode>::FIXED_LEN, Some(1));
    assert_eq!(CurveAccount::TOTAL_SUPPLY_OFFSET, 8);
    assert_eq!(CurveAccount::CURVE_AMOUNT_OFFSET, 16);
    assert_eq!(CurveAccount::MINT_OFFSET, 24);
    assert_eq!(CurveAccount::DECIMALS_OFFSET, 56);
    assert_eq!(CurveAccount::COLLATERAL_CURRENCY_OFFSET, 57);
    assert_eq!(CurveAccount::CURVE_TYPE_OFFSET, 58);
    assert_eq!(CurveAccount::MARKETCAP_THRESHOLD_OFFSET, 59);
    assert_eq!(CurveAccount::MARKETCAP_CURRENCY_OFFSET, 67);
    assert_eq!(CurveAccount::MIGRATION_FEE_OFFSET, 68);
    assert_eq!(CurveAccount::COEF_B_OFFSET, 76);
    assert_eq!(CurveAccount::BUMP_OFFSET, 80);
    assert_eq!(CurveAccount::MIGRATION_TARGET_OFFSET, 81);
    assert_eq!(CurveAccount::BYTES, Some(82));

    let account = sample_curve_account();
    let bytes = account.to_vec().unwrap();
    assert_eq!(bytes.len(), 82);
    assert_eq!(&bytes[24..56], &[0x5A; 32]);
    assert_eq!(bytes[57], 0);
    assert_eq!(bytes[58], 2);
    assert_eq!(bytes[67], 1);
    assert_eq!(bytes[80], 253);
    assert_eq!(bytes[81], 1);
    assert_eq!(CurveAccount::from_slice(&bytes).unwrap(), account);

    let by_mint = CurveAccount::mint_filter(&account.mint).unwrap();
    assert_eq!(by_mint.offset(), Some(24));
    assert!(by_mint.matches(&bytes));
    assert!(CurveAccount::curve_type_filter(&CurveType::Exponential)
        .unwrap()
        .matches(&bytes));
}

#[test]
fn variable_record_offsets_stop_after_first_variable_field() {
    assert_eq!(InitializeFarm::REWARD_MINT_OFFSET, 8);
    assert_eq!(InitializeFarm::NAME_OFFSET, 40);
    assert_eq!(InitializeFarm::BYTES, None);
    assert_eq!(InitializeFarm::record_size_filter(), None);
    assert_eq!(
        InitializeFarm::DISCRIMINATOR,
        Discriminator::for_instruction("initialize_farm")
    );
    assert_eq!(<InitializeFarm as Decode>::MIN_LEN, 8 + 32 + 4 + 4 + 1 + 4);
}

#[test]
fn variable_record_length_accounting() {
    let cases = [
        InitializeFarm {
            reward_mint: Identifier::new([1; 32]),
            name: String::new(),
            weights: Vec::new(),
            cap: None,
            tiers: Vec::new(),
        },
        InitializeFarm {
            reward_mint: Identifier::new([2; 32]),
            name: "sol-usdc".into(),
            weights: vec![1, 2, 3],
            cap: Some(0),
            tiers: vec![vec![], vec![9, 9]],
        },
    ];
    for farm in cases {
        let bytes = farm.to_vec().unwrap();
        assert_eq!(bytes.len(), farm.encoded_len());
        let (decoded, used) = InitializeFarm::read_at(&bytes, 0).unwrap();
        assert_eq!(decoded, farm);
        assert_eq!(used, bytes.len());
    }

    let empty = InitializeFarm {
        reward_mint: Identifier::default(),
        name: String::new(),
        weights: Vec::new(),
        cap: None,
        tiers: Vec::new(),
    };
    assert_eq!(empty.encoded_len(), 8 + 32 + 4 + 4 + 1 + 4);
}

#[test]
fn instruction_payload_matches_record_encoding() {
    let farm = InitializeFarm {
        reward_mint: Identifier::new([3; 32]),
        name: "farm".into(),
        weights: vec![10],
        cap: Some(5),
        tiers: vec![vec![1]],
    };
    let record = farm.to_vec().unwrap();

    let args = (
        farm.reward_mint,
        farm.name.clone(),
        farm.weights.clone(),
        farm.cap,
    );
    let mut payload = instruction_data(InitializeFarm::DISCRIMINATOR, &args).unwrap();
    payload.extend(farm.tiers.to_vec().unwrap());
    assert_eq!(payload, record);
}

#[test]
fn union_variants_roundtrip() {
    assert_eq!(Fee::TYPE_NAME, "Fee");
    assert_eq!(Fee::VARIANT_COUNT, 3);
    assert_eq!(<Fee as Encode>::FIXED_LEN, None);
    assert_eq!(<Fee as Decode>::MIN_LEN, 1);

    let cases = [
        (Fee::Waived, vec![0u8]),
        (Fee::Flat(500), vec![1, 0xF4, 0x01, 0, 0, 0, 0, 0, 0]),
        (
            Fee::Tiered {
                bps: 30,
                cap: None,
            },
            vec![2, 30, 0, 0],
        ),
        (
            Fee::Tiered {
                bps: 30,
                cap: Some(7),
            },
            vec![2, 30, 0, 1, 7, 0, 0, 0, 0, 0, 0, 0],
        ),
    ];
    for (fee, expected) in cases {
        assert_eq!(fee.to_vec().unwrap(), expected);
        assert_eq!(fee.encoded_len(), expected.len());
        let (decoded, used) = Fee::read_at(&expected, 0).unwrap();
        assert_eq!(decoded, fee);
        assert_eq!(used, expected.len());
        assert_eq!(usize::from(fee.ordinal()), usize::from(expected[0]));
    }
}

#[test]
fn union_unknown_ordinal() {
    for ordinal in 3..=u8::MAX {
        assert_eq!(
            Fee::from_slice(&[ordinal, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap_err(),
            Error::UnknownOrdinal {
                type_name: "Fee",
                ordinal
            }
        );
    }
    assert_eq!(
        Currency::from_slice(&[2]).unwrap_err(),
        Error::UnknownOrdinal {
            type_name: "Currency",
            ordinal: 2
        }
    );
}

#[test]
fn fixed_discriminator_attribute() {
    #[derive(Layout, Debug, PartialEq)]
    #[layout(discriminator = [0, 0, 0, 0, 0, 0, 0, 1])]
    struct Ping;

    assert_eq!(Ping::BYTES, Some(8));
    assert_eq!(Ping.to_vec().unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(Ping::from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]).unwrap(), Ping);
    assert_eq!(
        <Ping as Discriminated>::DISCRIMINATOR,
        Discriminator::new([0, 0, 0, 0, 0, 0, 0, 1])
    );
}

#[derive(Debug, PartialEq)]
enum ProgramAccount {
    Curve(BondingCurve),
    CurveAccount(CurveAccount),
}

impl From<BondingCurve> for ProgramAccount {
    fn from(value: BondingCurve) -> Self {
        ProgramAccount::Curve(value)
    }
}

impl From<CurveAccount> for ProgramAccount {
    fn from(value: CurveAccount) -> Self {
        ProgramAccount::CurveAccount(value)
    }
}

#[test]
fn registry_routes_derived_records() {
    let mut registry = DecoderRegistry::<ProgramAccount>::new();
    registry.register_record::<BondingCurve>().unwrap();
    registry.register_record::<CurveAccount>().unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&BondingCurve::DISCRIMINATOR));

    let curve = sample_curve();
    assert_eq!(
        registry.decode(&curve.to_vec().unwrap()).unwrap(),
        ProgramAccount::Curve(curve)
    );
    let account = sample_curve_account();
    assert_eq!(
        registry.decode(&account.to_vec().unwrap()).unwrap(),
        ProgramAccount::CurveAccount(account)
    );

    assert_eq!(
        registry.register_record::<BondingCurve>().unwrap_err(),
        Error::DuplicateDiscriminator(BondingCurve::DISCRIMINATOR.to_bytes())
    );
    let unknown = Discriminator::for_account("Unknown").to_bytes();
    assert_eq!(
        registry.decode(&unknown).unwrap_err(),
        Error::UnknownDiscriminator(unknown)
    );
}

#[derive(Layout, Debug, Clone, PartialEq)]
#[layout(account)]
struct Fill {
    discriminator: u8,
    size: u64,
    price: u64,
}

#[test]
fn fields_named_size_and_discriminator() {
    let fill = Fill {
        discriminator: 3,
        size: 500,
        price: 21,
    };
    let bytes = fill.to_vec().unwrap();
    assert_eq!(Fill::DISCRIMINATOR_OFFSET, 8);
    assert_eq!(Fill::SIZE_OFFSET, 9);
    assert_eq!(Fill::PRICE_OFFSET, 17);

    assert_eq!(
        Fill::size_filter(&500).unwrap(),
        Filter::Memcmp {
            offset: 9,
            bytes: 500u64.to_le_bytes().into()
        }
    );
    assert!(Fill::size_filter(&500).unwrap().matches(&bytes));
    assert!(Fill::discriminator_filter(&3).unwrap().matches(&bytes));
    assert!(!Fill::discriminator_filter(&4).unwrap().matches(&bytes));

    assert_eq!(Fill::record_size_filter(), Some(Filter::DataSize(25)));
    assert!(Fill::record_discriminator_filter().matches(&bytes));
    assert_eq!(
        <Fill as Discriminated>::discriminator_filter(),
        Fill::record_discriminator_filter()
    );
    assert_eq!(Fill::from_slice(&bytes).unwrap(), fill);
}

#[derive(Layout, Debug, Clone, PartialEq)]
#[layout(account = "Wrapper")]
struct Wrapper<T> {
    header: u32,
    inner: T,
}

#[derive(Layout, Debug, Clone, PartialEq)]
enum Either<L, R> {
    Left(L),
    Right(R),
}

#[test]
fn generic_records_and_unions() {
    assert_eq!(Wrapper::<u64>::BYTES, Some(20));
    assert_eq!(Wrapper::<String>::BYTES, None);
    assert_eq!(Wrapper::<String>::INNER_OFFSET, 12);
    assert_eq!(Wrapper::<u64>::DISCRIMINATOR, Wrapper::<String>::DISCRIMINATOR);

    let wrapped = Wrapper {
        header: 1,
        inner: String::from("abc"),
    };
    let bytes = wrapped.to_vec().unwrap();
    assert_eq!(bytes.len(), 8 + 4 + 4 + 3);
    assert_eq!(Wrapper::<String>::from_slice(&bytes).unwrap(), wrapped);

    let value: Either<u8, Identifier> = Either::Right(Identifier::new([5; 32]));
    let bytes = value.to_vec().unwrap();
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes.len(), 33);
    assert_eq!(Either::<u8, Identifier>::from_slice(&bytes).unwrap(), value);
    assert_eq!(<Either<u8, u8> as Encode>::FIXED_LEN, Some(2));
    assert_eq!(<Either<u8, Identifier> as Encode>::FIXED_LEN, None);
}
