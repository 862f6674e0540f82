use probdist::{Binomial, Distribution, Result};

fn main() -> Result<()> {
    let d = Binomial::new(42, 10, 0.65)?;
    println!("{}", d.pdf(9.)?);
    Ok(())
}
