use crate::phenotype::Phenotype;

/// Scores a phenotype. Higher is better.
pub trait Challenge<Pheno: Phenotype> {
    fn score(&self, phenotype: &Pheno) -> f64;
}

impl<Pheno, C> Challenge<Pheno> for Box<C>
where
    Pheno: Phenotype,
    C: Challenge<Pheno> + ?Sized,
{
    fn score(&self, phenotype: &Pheno) -> f64 {
        (**self).score(phenotype)
    }
}
