use serde::Serialize;

use crate::config::Variant;

/* Repository-relative homes of the per-variant artifacts. The packaging
 * script pastes the emitted path lists into the wrapper-level flow config,
 * so these must match the repository layout exactly. */
pub const RTL_DIR: &str = "verilog/rtl/trng_configs";
pub const GL_DIR: &str = "verilog/gl";
pub const LEF_DIR: &str = "lef";
pub const GDS_DIR: &str = "gds";
pub const LIB_DIR: &str = "lib";
pub const SPEF_DIR: &str = "spef";

/* Sources of the shared entropy core, pulled into every variant's flow
 * alongside its generated wrapper. */
pub const FAMILY_SOURCES: [&str; 3] = [
    "verilog/rtl/trng/rtl/trng.sv",
    "verilog/rtl/trng/rtl/ring_oscillator.sv",
    "verilog/rtl/trng/rtl/inverter_chain.sv",
];

/** The extraction corners every hardened macro is characterized at. */
pub const CORNERS: [&str; 3] = ["min", "nom", "max"];

/**
 * Parasitic-extraction references for one variant: one path per corner,
 * plus the netlist identifier shared by all three.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpefSet {
    pub netlist: String,
    pub min: String,
    pub nom: String,
    pub max: String,
}

impl Variant {
    /** Instance name of the macro inside the user-project wrapper. */
    pub fn instance(&self) -> String {
        format!("{}_i", self.name())
    }

    /** Generated structural wrapper source. */
    pub fn rtl_source(&self) -> String {
        format!("{}/{}.sv", RTL_DIR, self.name())
    }

    /** Generated behavioural model source. */
    pub fn model_source(&self) -> String {
        format!("{}/{}_model.sv", RTL_DIR, self.name())
    }

    /** Gate-level netlist standing in for the hardened macro. */
    pub fn blackbox_netlist(&self) -> String {
        format!("{}/{}.v", GL_DIR, self.name())
    }

    /** Abstract (pins and blockages only) view of the macro. */
    pub fn lef(&self) -> String {
        format!("{}/{}.lef", LEF_DIR, self.name())
    }

    /** Full layout of the macro. */
    pub fn gds(&self) -> String {
        format!("{}/{}.gds", GDS_DIR, self.name())
    }

    /** Timing library of the macro. */
    pub fn lib(&self) -> String {
        format!("{}/{}.lib", LIB_DIR, self.name())
    }

    /** Extraction results, one per corner, keyed by the shared netlist. */
    pub fn spef(&self) -> SpefSet {
        let netlist = self.name();
        let corner =
            |c: &str| format!("{}/{}/{}.{}.spef", SPEF_DIR, c, netlist, c);

        SpefSet {
            min: corner("min"),
            nom: corner("nom"),
            max: corner("max"),
            netlist,
        }
    }

    /**
     * Instantiation snippet wiring the macro into the user-project
     * wrapper. The enable and output slots are indexed by table position
     * ('index'), never by anything derived from the parameters, so the
     * wrapper buses stay aligned with the placement and build order.
     */
    pub fn instantiation(&self) -> String {
        format!(
            "{name} {instance} (\n\
             \x20   .clk        (clk),\n\
             \x20   .trng_en    (trng_en[{index}]),\n\
             \x20   .trng_out   (trng_out[{index}])\n\
             );\n",
            name = self.name(),
            instance = self.instance(),
            index = self.get_index(),
        )
    }

    /**
     * Content of the companion pin-order file. All three pins leave on the
     * north edge, towards the wrapper bus; the other edges are declared so
     * the flow sees every section, but stay empty.
     */
    pub fn pin_order(&self) -> String {
        "#N\nclk\ntrng_en\ntrng_out\n\n#E\n\n#S\n\n#W\n".to_string()
    }
}

/**
 * Per-variant flow configuration, serialized as the 'config.json' the
 * hardening flow reads. Struct order is emission order, and everything
 * except the design name, source list and die area is a fixed tuning
 * constant shared by the whole family.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowConfig {
    #[serde(rename = "DESIGN_NAME")]
    pub design_name: String,
    #[serde(rename = "VERILOG_FILES")]
    pub verilog_files: Vec<String>,
    #[serde(rename = "CLOCK_PORT")]
    pub clock_port: String,
    #[serde(rename = "CLOCK_PERIOD")]
    pub clock_period: u32,
    #[serde(rename = "FP_SIZING")]
    pub fp_sizing: String,
    #[serde(rename = "DIE_AREA")]
    pub die_area: String,
    #[serde(rename = "PL_TARGET_DENSITY")]
    pub pl_target_density: f64,
    #[serde(rename = "DESIGN_IS_CORE")]
    pub design_is_core: bool,
    #[serde(rename = "FP_PIN_ORDER_CFG")]
    pub fp_pin_order_cfg: String,
}

impl FlowConfig {
    /**
     * Builds the record for one variant: its wrapper source plus the
     * shared family implementation, and a square die sized from the
     * footprint estimate (the same value the packer reserved for it).
     */
    pub fn for_variant(variant: &Variant) -> Self {
        let mut verilog_files = vec![variant.rtl_source()];
        verilog_files.extend(FAMILY_SOURCES.iter().map(|s| s.to_string()));

        Self {
            design_name: variant.name(),
            verilog_files,
            clock_port: "clk".to_string(),
            clock_period: 25,
            fp_sizing: "absolute".to_string(),
            die_area: format!("0 0 {0} {0}", variant.get_footprint()),
            pl_target_density: 0.6,
            design_is_core: false,
            fp_pin_order_cfg: "dir::pin_order.cfg".to_string(),
        }
    }
}
