use std::collections::BTreeSet;

use varrank_common::{FilterResult, FilterType, Gene, Result, VarrankError, VariantRecord};

use crate::filter::Filter;

/// Allow-list of genes, matched against either the gene identifier or the
/// gene symbol. Usable over variants and over genes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneIdFilter {
    gene_ids: BTreeSet<String>,
}

impl GeneIdFilter {
    pub fn new<I, S>(gene_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let gene_ids: BTreeSet<String> = gene_ids
            .into_iter()
            .map(Into::into)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if gene_ids.is_empty() {
            return Err(VarrankError::invalid_config(
                FilterType::GeneId,
                "the gene allow-list is empty",
            ));
        }
        Ok(Self { gene_ids })
    }

    pub fn gene_ids(&self) -> &BTreeSet<String> {
        &self.gene_ids
    }

    fn allows(&self, gene_id: &str, symbol: &str) -> FilterResult {
        if self.gene_ids.contains(gene_id) || self.gene_ids.contains(symbol) {
            FilterResult::pass(FilterType::GeneId)
        } else {
            FilterResult::fail(FilterType::GeneId)
        }
    }

    fn messages(&self) -> Vec<String> {
        let ids: Vec<&str> = self.gene_ids.iter().map(String::as_str).collect();
        vec![format!("Genes to keep: {}", ids.join(", "))]
    }
}

impl Filter<VariantRecord> for GeneIdFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::GeneId
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        self.allows(&variant.gene_id, &variant.gene_symbol)
    }

    fn report_messages(&self) -> Vec<String> {
        self.messages()
    }
}

impl Filter<Gene> for GeneIdFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::GeneId
    }

    fn run_filter(&self, gene: &Gene) -> FilterResult {
        self.allows(&gene.gene_id, &gene.symbol)
    }

    fn report_messages(&self) -> Vec<String> {
        self.messages()
    }
}
