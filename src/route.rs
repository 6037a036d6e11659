use crate::error::InvalidInput;
use crate::path::{is_chained, parse_address, parse_legs, Legs, SwapPath};
use ethers::types::Address;

/// Two legs: borrow, swap out on the first DEX, swap back on the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRoute {
    pub dexes: [Address; 2],
    pub paths: [SwapPath; 2],
}

/// Three legs; `paths[1]` is the intermediate hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriangularRoute {
    pub dexes: [Address; 3],
    pub paths: [SwapPath; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashLoanRoute {
    Simple(SimpleRoute),
    Triangular(TriangularRoute),
}

impl FlashLoanRoute {
    /// Builds a route from raw address strings.
    ///
    /// Runs the same checks the contract calls rely on: one dex per leg and a
    /// well-formed, chained path list. The leg count picks the variant.
    pub fn from_parts<D, P>(dexes: &[D], paths: &[Vec<P>]) -> Result<Self, InvalidInput>
    where
        D: AsRef<str>,
        P: AsRef<str>,
    {
        if dexes.len() != paths.len() {
            return Err(InvalidInput::DexCountMismatch {
                dexes: dexes.len(),
                paths: paths.len(),
            });
        }
        let legs = parse_legs(paths).ok_or(InvalidInput::InvalidPath)?;

        let dexes = dexes
            .iter()
            .map(|dex| {
                let dex = dex.as_ref();
                parse_address(dex).ok_or_else(|| InvalidInput::InvalidDexAddress(dex.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // dexes.len() == paths.len() was checked above
        Ok(match legs {
            Legs::Two(paths) => Self::Simple(SimpleRoute {
                dexes: [dexes[0], dexes[1]],
                paths,
            }),
            Legs::Three(paths) => Self::Triangular(TriangularRoute {
                dexes: [dexes[0], dexes[1], dexes[2]],
                paths,
            }),
        })
    }

    pub fn legs(&self) -> usize {
        match self {
            Self::Simple(_) => 2,
            Self::Triangular(_) => 3,
        }
    }

    pub fn dexes(&self) -> &[Address] {
        match self {
            Self::Simple(route) => &route.dexes,
            Self::Triangular(route) => &route.dexes,
        }
    }

    pub fn paths(&self) -> &[SwapPath] {
        match self {
            Self::Simple(route) => &route.paths,
            Self::Triangular(route) => &route.paths,
        }
    }

    /// Re-checks the joints of a route assembled by hand.
    pub fn is_chained(&self) -> bool {
        is_chained(self.paths())
    }

    pub fn into_simple(self) -> Result<SimpleRoute, InvalidInput> {
        match self {
            Self::Simple(route) => Ok(route),
            other => Err(InvalidInput::HopCount {
                expected: 2,
                actual: other.legs(),
            }),
        }
    }

    pub fn into_triangular(self) -> Result<TriangularRoute, InvalidInput> {
        match self {
            Self::Triangular(route) => Ok(route),
            other => Err(InvalidInput::HopCount {
                expected: 3,
                actual: other.legs(),
            }),
        }
    }
}
