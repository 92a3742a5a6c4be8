//! DogeCash network parameters.
//!
//! The parameter sets for both networks are registered once per process and
//! shared read-only afterwards. Registration is idempotent: every caller of
//! [`ChainParamsRegistry::global`] observes the same instance, and a second
//! (or concurrent) caller never re-registers or panics.

use once_cell::sync::OnceCell;

/// Mainnet wire magic.
pub const MAINNET_MAGIC: u32 = 0xe9fd_c490;
/// Testnet wire magic.
pub const TESTNET_MAGIC: u32 = 0xba65_7645;

/// Static per-network constants: wire magic plus the address version bytes
/// the baseline resolver encodes under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainParams {
    pub name: &'static str,
    pub magic: u32,
    pub p2pkh_prefix: u8,
    pub p2sh_prefix: u8,
    pub wif_prefix: u8,
}

/// Both parameter sets, constructed once at first use and handed out by
/// reference to the decoders that need them.
pub struct ChainParamsRegistry {
    main: ChainParams,
    test: ChainParams,
}

static REGISTRY: OnceCell<ChainParamsRegistry> = OnceCell::new();

impl ChainParamsRegistry {
    /// Returns the process-wide registry, registering the parameter sets on
    /// first use. The cell's check-and-set guards against a concurrent first
    /// call initializing twice.
    pub fn global() -> &'static ChainParamsRegistry {
        REGISTRY.get_or_init(ChainParamsRegistry::bootstrap)
    }

    fn bootstrap() -> Self {
        ChainParamsRegistry {
            main: ChainParams {
                name: "main",
                magic: MAINNET_MAGIC,
                p2pkh_prefix: 30, // addresses starting with 'D'
                p2sh_prefix: 19,
                wif_prefix: 122,
            },
            test: ChainParams {
                name: "test",
                magic: TESTNET_MAGIC,
                p2pkh_prefix: 139, // addresses starting with 'x' or 'y'
                p2sh_prefix: 19,
                wif_prefix: 239,
            },
        }
    }

    /// Parameters for a named network. Anything other than `"test"` resolves
    /// to mainnet.
    pub fn params(&self, chain: &str) -> &ChainParams {
        match chain {
            "test" => &self.test,
            _ => &self.main,
        }
    }

    /// Resolves a parameter set from a wire magic, as reported by a backend
    /// node.
    pub fn for_magic(&self, magic: u32) -> Option<&ChainParams> {
        [&self.main, &self.test]
            .into_iter()
            .find(|p| p.magic == magic)
    }
}
