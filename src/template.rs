use crate::config::Variant;

/*
 * Source templates for the generated variants. Substitution points are the
 * named markers '{name}', '{ringos}' and '{inverter}'; everything else is
 * emitted byte-for-byte. A marker that is misspelled here simply survives
 * into the output, so template defects are caught by the rendering tests,
 * not at runtime.
 */

/**
 * Structural wrapper for one variant. The wrapper pins the two elaboration
 * parameters of the shared 'trng' family module, so that each parameter
 * combination hardens as an independent macro.
 */
pub const TRNG_WRAPPER: &str = "\
`default_nettype none

module {name} (
    input  clk,     // Sampling clock
    input  trng_en, // Enable all ring oscillators
    output trng_out // Output of the trng
);

    localparam NUM_OSCILLATORS = {ringos};
    localparam NUM_INVERTER = {inverter};

    trng #(
        .NUM_INVERTER       (NUM_INVERTER),
        .NUM_OSCILLATORS    (NUM_OSCILLATORS)
    ) trng_i (
        .clk        (clk),
        .trng_en    (trng_en),
        .trng_out   (trng_out)
    );

endmodule
";

/**
 * Behavioural stand-in with the same ports and module name as the
 * structural wrapper. The output is driven from $urandom instead of the
 * oscillator array, for simulations where the hardened macro is either
 * unavailable or too slow to elaborate.
 */
pub const TRNG_MODEL: &str = "\
`default_nettype none

// Simulation model of {name}. Do not synthesize.

module {name} (
    input  clk,
    input  trng_en,
    output reg trng_out
);

    localparam NUM_OSCILLATORS = {ringos};
    localparam NUM_INVERTER = {inverter};

    always @(posedge clk) begin
        if (trng_en) begin
            trng_out <= $urandom;
        end else begin
            trng_out <= 1'b0;
        end
    end

endmodule
";

/**
 * Renders 'template' for the given variant by substituting the canonical
 * name and both structural parameters. Pure: no shared template state, and
 * the same variant always yields byte-identical output.
 */
pub fn render(template: &str, variant: &Variant) -> String {
    template
        .replace("{name}", &variant.name())
        .replace("{ringos}", &variant.get_num_ringos().to_string())
        .replace("{inverter}", &variant.get_num_inverter().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VariantTable;

    fn variant(num_ringos: u32, num_inverter: u32) -> Variant {
        let table =
            VariantTable::new(&[(num_ringos, num_inverter, 70)]).unwrap();
        table.variants()[0].clone()
    }

    #[test]
    fn wrapper_substitutes_all_markers() {
        let text = render(TRNG_WRAPPER, &variant(8, 5));
        assert!(text.contains("module trng_8x5 ("));
        assert!(text.contains("localparam NUM_OSCILLATORS = 8;"));
        assert!(text.contains("localparam NUM_INVERTER = 5;"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn model_keeps_the_structural_module_name() {
        // The model substitutes for the wrapper in simulation, so it must
        // elaborate under the same name.
        let text = render(TRNG_MODEL, &variant(32, 7));
        assert!(text.contains("module trng_32x7 ("));
        assert!(text.contains("$urandom"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let v = variant(2, 3);
        assert_eq!(render(TRNG_WRAPPER, &v), render(TRNG_WRAPPER, &v));
        assert_eq!(render(TRNG_MODEL, &v), render(TRNG_MODEL, &v));
    }

    #[test]
    fn wrapper_and_model_differ_only_in_body() {
        let v = variant(1, 3);
        let wrapper = render(TRNG_WRAPPER, &v);
        let model = render(TRNG_MODEL, &v);
        assert_ne!(wrapper, model);
        assert!(wrapper.contains("trng_i"));
        assert!(!model.contains("trng_i"));
    }
}
