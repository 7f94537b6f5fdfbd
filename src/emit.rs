use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::artifact::{FlowConfig, CORNERS};
use crate::config::{Variant, VariantTable};
use crate::floorplan::{place_all, Slot};
use crate::template::{render, TRNG_MODEL, TRNG_WRAPPER};

/**
 * Writes the per-variant files below 'out_dir': the structural wrapper,
 * the behavioural model, and a per-variant directory holding the flow
 * configuration and the pin-order file.
 *
 * Every variant owns distinct target paths, so re-running over an
 * unchanged table rewrites each file with identical bytes.
 */
pub fn write_artifacts(
    table: &VariantTable,
    out_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(out_dir)?;

    for variant in table.iter() {
        let name = variant.name();

        fs::write(
            out_dir.join(format!("{}.sv", name)),
            render(TRNG_WRAPPER, variant),
        )?;
        fs::write(
            out_dir.join(format!("{}_model.sv", name)),
            render(TRNG_MODEL, variant),
        )?;

        let flow_dir = out_dir.join(&name);
        fs::create_dir_all(&flow_dir)?;

        let mut json =
            serde_json::to_string_pretty(&FlowConfig::for_variant(variant))?;
        json.push('\n');
        fs::write(flow_dir.join("config.json"), json)?;
        fs::write(flow_dir.join("pin_order.cfg"), variant.pin_order())?;

        debug!("{}: wrote sources and flow config", name);
    }

    info!("Wrote artifacts for {} variants", table.len());
    Ok(())
}

/**
 * The aggregated stream for the packaging script: placement lines, the
 * eight path-list sections, the instantiation snippets, and the build
 * chain. The script consumes it positionally, so every block follows
 * table order.
 */
pub fn stream(table: &VariantTable) -> String {
    let slots = place_all(table.variants());

    let mut out = String::new();
    out.push_str(&placements_block(table, &slots));
    out.push('\n');
    out.push_str(&path_sections_block(table));
    out.push('\n');
    out.push_str(&instantiations_block(table));
    out.push_str(&build_chain(table));
    out
}

/**
 * Floorplan placement lines, '<instance> <x> <y> <orientation>', one per
 * variant.
 */
pub fn placements_block(table: &VariantTable, slots: &[Slot]) -> String {
    let mut out = String::new();
    for (variant, slot) in table.iter().zip(slots.iter()) {
        writeln!(
            out,
            "{} {} {} {}",
            variant.instance(),
            slot.x,
            slot.y,
            slot.orientation
        )
        .unwrap();
    }
    out
}

fn section(out: &mut String, key: &str, paths: &[String]) {
    writeln!(out, "\"{}\": [", key).unwrap();
    for (i, path) in paths.iter().enumerate() {
        let sep = if i + 1 < paths.len() { "," } else { "" };
        writeln!(out, "    \"{}\"{}", path, sep).unwrap();
    }
    writeln!(out, "],").unwrap();
}

fn collect(variants: &[Variant], f: impl Fn(&Variant) -> String) -> Vec<String> {
    variants.iter().map(f).collect()
}

/**
 * The eight bracketed path-list sections, each a fragment ready to paste
 * into the wrapper-level flow configuration. The SPEF category yields one
 * section per extraction corner; the shared netlist identifier is the stem
 * of every corner path.
 */
pub fn path_sections_block(table: &VariantTable) -> String {
    let variants = table.variants();
    let mut out = String::new();

    let mut sources: Vec<String> = Vec::with_capacity(2 * variants.len());
    for v in variants {
        sources.push(v.rtl_source());
        sources.push(v.model_source());
    }

    section(&mut out, "VERILOG_FILES", &sources);
    section(
        &mut out,
        "VERILOG_FILES_BLACKBOX",
        &collect(variants, Variant::blackbox_netlist),
    );
    section(&mut out, "EXTRA_LEFS", &collect(variants, Variant::lef));
    section(&mut out, "EXTRA_GDS_FILES", &collect(variants, Variant::gds));
    section(&mut out, "EXTRA_LIBS", &collect(variants, Variant::lib));

    for corner in CORNERS {
        let paths = collect(variants, |v| {
            let spef = v.spef();
            match corner {
                "min" => spef.min,
                "nom" => spef.nom,
                _ => spef.max,
            }
        });
        section(
            &mut out,
            &format!("EXTRA_SPEFS_{}", corner.to_uppercase()),
            &paths,
        );
    }

    out
}

/** One instantiation snippet per variant, blank-line separated. */
pub fn instantiations_block(table: &VariantTable) -> String {
    let mut out = String::new();
    for variant in table.iter() {
        out.push_str(&variant.instantiation());
        out.push('\n');
    }
    out
}

/** Shell fragment chaining one hardening step per variant. */
pub fn build_chain(table: &VariantTable) -> String {
    let chain: Vec<String> =
        table.iter().map(|v| format!("make {}", v.name())).collect();
    format!("{}\n", chain.join(" && "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_is_deterministic() {
        let table = VariantTable::builtin().unwrap();
        assert_eq!(stream(&table), stream(&table));
    }

    #[test]
    fn stream_opens_with_the_placement_lines() {
        let table = VariantTable::builtin().unwrap();
        let text = stream(&table);
        assert!(text.starts_with("trng_1x3_i 320 92 N\n"));
        assert!(text.contains("\ntrng_1x5_i 430 92 N\n"));
    }

    #[test]
    fn stream_has_eight_path_sections() {
        let table = VariantTable::builtin().unwrap();
        let text = stream(&table);
        let sections = [
            "\"VERILOG_FILES\": [",
            "\"VERILOG_FILES_BLACKBOX\": [",
            "\"EXTRA_LEFS\": [",
            "\"EXTRA_GDS_FILES\": [",
            "\"EXTRA_LIBS\": [",
            "\"EXTRA_SPEFS_MIN\": [",
            "\"EXTRA_SPEFS_NOM\": [",
            "\"EXTRA_SPEFS_MAX\": [",
        ];
        for key in sections.iter() {
            assert!(text.contains(key), "missing section {}", key);
        }
        assert_eq!(text.matches("\": [").count(), sections.len());
    }

    #[test]
    fn sections_preserve_table_order() {
        let table = VariantTable::new(&[(1, 3, 70), (2, 5, 90)]).unwrap();
        let text = path_sections_block(&table);
        let first = text.find("trng_1x3.lef").unwrap();
        let second = text.find("trng_2x5.lef").unwrap();
        assert!(first < second);
    }

    #[test]
    fn stream_ends_with_the_build_chain() {
        let table = VariantTable::new(&[(1, 3, 70), (1, 5, 70)]).unwrap();
        let text = stream(&table);
        assert!(text.ends_with("make trng_1x3 && make trng_1x5\n"));
    }

    #[test]
    fn write_artifacts_creates_the_per_variant_set() {
        let table = VariantTable::new(&[(1, 3, 70)]).unwrap();
        let dir = tempfile::tempdir().unwrap();

        write_artifacts(&table, dir.path()).unwrap();

        assert!(dir.path().join("trng_1x3.sv").is_file());
        assert!(dir.path().join("trng_1x3_model.sv").is_file());
        assert!(dir.path().join("trng_1x3/config.json").is_file());
        assert!(dir.path().join("trng_1x3/pin_order.cfg").is_file());
    }

    #[test]
    fn written_flow_config_round_trips_as_json() {
        let table = VariantTable::new(&[(8, 7, 140)]).unwrap();
        let dir = tempfile::tempdir().unwrap();

        write_artifacts(&table, dir.path()).unwrap();

        let text =
            fs::read_to_string(dir.path().join("trng_8x7/config.json"))
                .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["DESIGN_NAME"], "trng_8x7");
        assert_eq!(value["DIE_AREA"], "0 0 140 140");
        assert_eq!(value["FP_PIN_ORDER_CFG"], "dir::pin_order.cfg");
    }

    #[test]
    fn rewriting_produces_identical_bytes() {
        let table = VariantTable::new(&[(2, 7, 90)]).unwrap();
        let dir = tempfile::tempdir().unwrap();

        write_artifacts(&table, dir.path()).unwrap();
        let first =
            fs::read_to_string(dir.path().join("trng_2x7.sv")).unwrap();

        write_artifacts(&table, dir.path()).unwrap();
        let second =
            fs::read_to_string(dir.path().join("trng_2x7.sv")).unwrap();

        assert_eq!(first, second);
    }
}
