use ethers::types::Address;
use ethers::utils::to_checksum;
use std::str::FromStr;

/// Number of hex digits in an address without its prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// An ordered list of token addresses routed through a single DEX.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    pub fn new(hops: Vec<Address>) -> Self {
        Self(hops)
    }

    pub fn first(&self) -> Option<&Address> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Address> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hops(&self) -> &[Address] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Address> {
        self.0
    }

    /// Parses every hop, failing on the first malformed address.
    pub fn parse<S: AsRef<str>>(hops: &[S]) -> Option<Self> {
        hops.iter()
            .map(|hop| parse_address(hop.as_ref()))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }
}

/// Parses an address, accepting an optional `0x` prefix.
///
/// All-lowercase and all-uppercase digits are accepted as-is; mixed case must
/// match the EIP-55 checksum.
pub fn parse_address(candidate: &str) -> Option<Address> {
    let digits = candidate.strip_prefix("0x").unwrap_or(candidate);
    if digits.len() != ADDRESS_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let address = Address::from_str(digits).ok()?;

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address, None)[2..] != *digits {
        return None;
    }

    Some(address)
}

pub fn is_ethereum_address(candidate: &str) -> bool {
    parse_address(candidate).is_some()
}

/// Legs of a route that passed [`is_path_correct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Legs {
    Two([SwapPath; 2]),
    Three([SwapPath; 3]),
}

/// Checks that `paths` describes a 2 or 3 leg route whose legs chain
/// together: the last token of each leg must be the first token of the next.
pub fn is_path_correct<S: AsRef<str>>(paths: &[Vec<S>]) -> bool {
    parse_legs(paths).is_some()
}

/// Parses the legs once and checks the route shape on the way.
///
/// Joints compare the hop text as written, so two spellings of one address
/// (checksummed and lowercase) do not chain.
pub(crate) fn parse_legs<S: AsRef<str>>(paths: &[Vec<S>]) -> Option<Legs> {
    let legs = match paths {
        [p0, p1] => Legs::Two([SwapPath::parse(p0)?, SwapPath::parse(p1)?]),
        [p0, p1, p2] => Legs::Three([
            SwapPath::parse(p0)?,
            SwapPath::parse(p1)?,
            SwapPath::parse(p2)?,
        ]),
        _ => return None,
    };

    let chained = paths
        .windows(2)
        .map(|pair| joint_matches(hop_text(pair[0].last()), hop_text(pair[1].first())))
        .fold(true, |all, joint| all & joint);

    chained.then_some(legs)
}

/// Every adjacent pair must share its joint token. All joints are evaluated.
pub(crate) fn is_chained(paths: &[SwapPath]) -> bool {
    paths
        .windows(2)
        .map(|pair| joint_matches(pair[0].last(), pair[1].first()))
        .fold(true, |all, joint| all & joint)
}

fn hop_text<S: AsRef<str>>(hop: Option<&S>) -> Option<&str> {
    hop.map(|hop| hop.as_ref())
}

// An empty leg has no joint token, so it never matches.
fn joint_matches<T: PartialEq + ?Sized>(last: Option<&T>, first: Option<&T>) -> bool {
    match (last, first) {
        (Some(last), Some(first)) => last == first,
        _ => false,
    }
}
