use std::fmt;

use thiserror::Error;

/* The production variant sweep: each entry is '(num_ringos, num_inverter,
 * footprint)', with the footprint estimate in microns. Table order matters,
 * as every positional artifact (packing, bus indices) follows it. */
pub const BUILTIN_CONFIGS: [(u32, u32, u32); 15] = [
    (1, 3, 70),
    (1, 5, 70),
    (1, 7, 70),
    (2, 3, 90),
    (2, 5, 90),
    (2, 7, 90),
    (8, 3, 140),
    (8, 5, 140),
    (8, 7, 140),
    (32, 3, 250),
    (32, 5, 250),
    (32, 7, 250),
    (128, 3, 500),
    (128, 5, 500),
    (128, 7, 500),
];

/**
 * Defects in the variant table. All of these abort the run before any
 * artifact is written, since a partially-generated set is unusable by the
 * downstream flow.
 */
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error(
        "trng_{num_ringos}x{num_inverter}: inverter count must be odd \
         (an even chain settles instead of oscillating)"
    )]
    EvenInverter { num_ringos: u32, num_inverter: u32 },

    #[error("trng_{num_ringos}x{num_inverter}: zero-valued parameter")]
    ZeroParameter { num_ringos: u32, num_inverter: u32 },

    #[error(
        "trng_{num_ringos}x{num_inverter}: duplicate variant \
         (canonical names join the artifacts, so they must be unique)"
    )]
    DuplicateVariant { num_ringos: u32, num_inverter: u32 },
}

/**
 * One parametrized configuration of the TRNG macro family.
 *
 * 'num_ringos' is the number of ring oscillators sampled by the macro, and
 * 'num_inverter' the (odd) number of inverters per ring. 'footprint' is
 * the estimated side length of the hardened macro, in microns, used for
 * both floorplan packing and die-area sizing.
 *
 * 'index' is the variant's position in table order, attached once at table
 * construction. The packer, the instantiation snippets, and the aggregated
 * output all derive their ordering from this one field, so the separate
 * emission passes cannot drift out of sync.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    num_ringos: u32,
    num_inverter: u32,
    footprint: u32,
    index: usize,
}

impl Variant {
    /**
     * Canonical name of the variant, e.g. "trng_8x5". Every generated
     * path, module, and instance identifier embeds this string, as the
     * physical-design flow joins artifacts purely by name equality.
     */
    pub fn name(&self) -> String {
        format!("trng_{}x{}", self.num_ringos, self.num_inverter)
    }

    pub fn get_num_ringos(&self) -> u32 {
        self.num_ringos
    }

    pub fn get_num_inverter(&self) -> u32 {
        self.num_inverter
    }

    pub fn get_footprint(&self) -> u32 {
        self.footprint
    }

    pub fn get_index(&self) -> usize {
        self.index
    }
}

/**
 * The ordered set of variants to generate. Construction validates every
 * entry and fails fast on the first defect; a table that constructs is
 * structurally sound for all downstream passes.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTable {
    variants: Vec<Variant>,
}

impl fmt::Display for VariantTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "VariantTable {{")?;
        for v in self.variants.iter() {
            writeln!(
                f,
                "    [{:2}] {:12} (ringos: {:3}, inverter: {}, \
                 footprint: {} um)",
                v.index,
                v.name(),
                v.num_ringos,
                v.num_inverter,
                v.footprint,
            )?;
        }
        writeln!(f, "}}")
    }
}

impl VariantTable {
    /**
     * Builds a table from '(num_ringos, num_inverter, footprint)' triples,
     * preserving their order verbatim and attaching table positions.
     *
     * Rejects zero parameters, even inverter counts, and repeated
     * '(num_ringos, num_inverter)' pairs. Duplicates would make later
     * artifacts silently overwrite earlier ones, so they are refused here
     * rather than discovered downstream.
     */
    pub fn new(entries: &[(u32, u32, u32)]) -> Result<Self, TableError> {
        let mut variants: Vec<Variant> = Vec::with_capacity(entries.len());

        for (index, &(num_ringos, num_inverter, footprint)) in
            entries.iter().enumerate()
        {
            if num_ringos == 0 || num_inverter == 0 || footprint == 0 {
                return Err(TableError::ZeroParameter {
                    num_ringos,
                    num_inverter,
                });
            }

            if num_inverter % 2 == 0 {
                return Err(TableError::EvenInverter {
                    num_ringos,
                    num_inverter,
                });
            }

            if variants.iter().any(|v| {
                v.num_ringos == num_ringos && v.num_inverter == num_inverter
            }) {
                return Err(TableError::DuplicateVariant {
                    num_ringos,
                    num_inverter,
                });
            }

            variants.push(Variant {
                num_ringos,
                num_inverter,
                footprint,
                index,
            });
        }

        Ok(Self { variants })
    }

    /** The compiled-in production table. */
    pub fn builtin() -> Result<Self, TableError> {
        Self::new(&BUILTIN_CONFIGS)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
        self.variants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let table = VariantTable::builtin().unwrap();
        assert_eq!(table.len(), 15);
    }

    #[test]
    fn indices_follow_table_order() {
        let table = VariantTable::builtin().unwrap();
        for (i, v) in table.iter().enumerate() {
            assert_eq!(v.get_index(), i);
        }
    }

    #[test]
    fn canonical_name_from_parameters() {
        let table = VariantTable::new(&[(128, 7, 500)]).unwrap();
        assert_eq!(table.variants()[0].name(), "trng_128x7");
    }

    #[test]
    fn rejects_even_inverter_count() {
        for num_inverter in [2, 4, 6, 8, 100] {
            let err = VariantTable::new(&[(1, num_inverter, 70)]);
            assert_eq!(
                err,
                Err(TableError::EvenInverter {
                    num_ringos: 1,
                    num_inverter,
                })
            );
        }
    }

    #[test]
    fn rejects_duplicate_parameter_pair() {
        let err = VariantTable::new(&[(1, 3, 70), (2, 5, 90), (1, 3, 140)]);
        assert_eq!(
            err,
            Err(TableError::DuplicateVariant {
                num_ringos: 1,
                num_inverter: 3,
            })
        );
    }

    #[test]
    fn rejects_zero_parameters() {
        assert!(VariantTable::new(&[(0, 3, 70)]).is_err());
        assert!(VariantTable::new(&[(1, 0, 70)]).is_err());
        assert!(VariantTable::new(&[(1, 3, 0)]).is_err());
    }

    #[test]
    fn validation_fails_fast_on_first_defect() {
        // The even entry comes before the duplicate, so it wins.
        let err = VariantTable::new(&[(1, 3, 70), (2, 4, 90), (1, 3, 70)]);
        assert_eq!(
            err,
            Err(TableError::EvenInverter {
                num_ringos: 2,
                num_inverter: 4,
            })
        );
    }
}
