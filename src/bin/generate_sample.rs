//! Write a synthetic differential-expression table of repeat elements to
//! `sample_elements.csv` for trying out `repel`.

use anyhow::{Context, Result};

/// SplitMix64 stream with a cached second normal deviate.
struct SampleRng {
    counter: u64,
    spare: Option<f64>,
}

impl SampleRng {
    fn seeded(seed: u64) -> Self {
        SampleRng {
            counter: seed,
            spare: None,
        }
    }

    /// Uniform in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        self.counter = self.counter.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.counter;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Normal deviate (Marsaglia polar method).
    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return mean + sd * z;
        }
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let k = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * k);
                return mean + sd * u * k;
            }
        }
    }
}

/// (element prefix, Type, Family, mean log2 fold change)
const FAMILIES: [(&str, &str, &str, f64); 8] = [
    ("L1Md", "LINE", "L1", 0.5),
    ("Lx", "LINE", "L1", 0.0),
    ("B1_Mus", "SINE", "Alu", -0.3),
    ("B2_Mm", "SINE", "B2", 0.2),
    ("MERVL", "LTR", "ERVL", 3.5),
    ("MT2_Mm", "LTR", "ERVL-MaLR", 2.0),
    ("IAPEz", "LTR", "ERVK", 1.0),
    ("GSAT_MM", "Satellite", "Satellite", 0.0),
];

fn main() -> Result<()> {
    let mut rng = SampleRng::seeded(42);

    let output_path = "sample_elements.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer
        .write_record([
            "Name",
            "baseMean",
            "log2FoldChange",
            "lfcSE",
            "pvalue",
            "padj",
            "Type",
            "Family",
        ])
        .context("writing header")?;

    let mut rows = 0;
    for (prefix, ty, family, mean_lfc) in FAMILIES {
        for copy in 0..25 {
            let base_mean = 10f64.powf(rng.normal(2.0, 0.8));
            let lfc_se = 0.2 + rng.uniform() * 0.6;
            let lfc = rng.normal(mean_lfc, 1.2);
            let z = (lfc / lfc_se).abs();
            let pvalue = (-0.717 * z - 0.416 * z * z).exp().min(1.0);

            // Every tenth record mimics an independent-filtering gap.
            let (lfc, padj) = if copy % 10 == 9 {
                (String::from("NA"), String::from("NA"))
            } else {
                (format!("{lfc:.4}"), format!("{:.4e}", (pvalue * 8.0).min(1.0)))
            };

            writer
                .write_record([
                    format!("{prefix}_{copy}"),
                    format!("{base_mean:.3}"),
                    lfc,
                    format!("{lfc_se:.4}"),
                    format!("{pvalue:.4e}"),
                    padj,
                    ty.to_string(),
                    family.to_string(),
                ])
                .context("writing record")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} elements to {output_path}");
    Ok(())
}
