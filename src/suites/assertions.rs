use anyhow::{Context, Result};
use serde_json::json;

use crate::assert::expect;
use crate::runner::{Reporter, TestRunner};

pub fn register<R: Reporter>(runner: &mut TestRunner<R>) -> Result<()> {
    runner.describe("Assertions", |r| {
        r.it("treats zero as defined", || {
            expect(Some(0)).to_be_defined()?;
            expect(json!(0)).to_be_defined()?;
            Ok(())
        })?;

        r.it("rejects missing values", || {
            let err = expect(None::<u32>)
                .to_be_defined()
                .err()
                .context("None passed to_be_defined")?;
            expect(err.to_string().contains("None")).to_be(true)?;
            Ok(())
        })?;

        r.it("orders numbers", || {
            expect(5).to_be_greater_than(3)?;
            expect(expect(3).to_be_greater_than(5).is_err()).to_be(true)?;
            Ok(())
        })?;

        r.it("separates thrown errors from violations", || {
            expect(|| "not-a-number".parse::<u32>()).to_throw()?;
            expect(expect(|| "42".parse::<u32>()).to_throw().is_err()).to_be(true)?;
            Ok(())
        })?;

        Ok(())
    })?;
    Ok(())
}
