//! Decision variables of the MILP model.

/// Opaque handle to a variable inside a [`MilpModel`](super::MilpModel).
///
/// Ids are dense indices into the model's variable table, which is also the
/// layout of an [`Assignment`](crate::solver::Assignment)'s value vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this variable in the model's variable table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structured variable key, replacing stringly-typed `x_i_j_k` names with
/// composite node/vehicle indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKey {
    /// Binary arc-selection variable: vehicle uses the arc `from -> to`.
    Arc {
        /// Source node id.
        from: usize,
        /// Destination node id.
        to: usize,
        /// Vehicle id.
        vehicle: usize,
    },
    /// Continuous arrival-time variable at a node for a vehicle.
    ///
    /// Only meaningful when that vehicle actually visits the node.
    Arrival {
        /// Node id.
        node: usize,
        /// Vehicle id.
        vehicle: usize,
    },
}

/// The domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// 0/1 variable.
    Binary,
    /// Real-valued variable.
    Continuous,
    /// General integer variable.
    Integer,
}

/// A decision variable: key, domain, and bounds.
#[derive(Debug, Clone)]
pub struct Variable {
    key: VarKey,
    domain: Domain,
    lower: f64,
    upper: f64,
}

impl Variable {
    pub(crate) fn new(key: VarKey, domain: Domain, lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper);
        Self {
            key,
            domain,
            lower,
            upper,
        }
    }

    /// The structured key of this variable.
    pub fn key(&self) -> VarKey {
        self.key
    }

    /// The variable's domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_key_equality() {
        let a = VarKey::Arc {
            from: 0,
            to: 1,
            vehicle: 2,
        };
        let b = VarKey::Arc {
            from: 0,
            to: 1,
            vehicle: 2,
        };
        assert_eq!(a, b);
        assert_ne!(
            a,
            VarKey::Arrival {
                node: 0,
                vehicle: 2
            }
        );
    }

    #[test]
    fn test_variable_fields() {
        let v = Variable::new(
            VarKey::Arrival {
                node: 1,
                vehicle: 0,
            },
            Domain::Continuous,
            0.0,
            100.0,
        );
        assert_eq!(v.domain(), Domain::Continuous);
        assert_eq!(v.lower(), 0.0);
        assert_eq!(v.upper(), 100.0);
    }
}
