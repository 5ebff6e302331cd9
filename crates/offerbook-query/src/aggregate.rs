//! Result aggregation: many pages in, one response out.
//!
//! Offers are appended in the order their pages were fetched. Nothing is
//! deduplicated or re-sorted.

use offerbook_types::{LedgerInfo, Marker, Offer, OfferPage};
use serde_json::{Map, Value, json};

/// Collects the offers of every page a request fetches.
#[derive(Debug, Default)]
pub struct OfferAggregator {
    offers: Vec<Offer>,
    pages: usize,
}

impl OfferAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page's offers and hand back its continuation marker.
    pub fn append(&mut self, page: OfferPage) -> Option<Marker> {
        self.pages += 1;
        self.offers.extend(page.offers);
        page.marker
    }

    /// Append a page's offers, discarding its marker.
    pub fn extend(&mut self, page: OfferPage) {
        self.pages += 1;
        self.offers.extend(page.offers);
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages
    }

    #[must_use]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    #[must_use]
    pub fn finish(self, ledger: LedgerInfo, marker: Option<Marker>) -> BookOffersResponse {
        BookOffersResponse {
            ledger,
            offers: self.offers,
            marker,
            pages: self.pages,
        }
    }
}

/// Successful `book_offers` result.
#[derive(Debug, Clone, PartialEq)]
pub struct BookOffersResponse {
    /// Snapshot every page was read from.
    pub ledger: LedgerInfo,
    pub offers: Vec<Offer>,
    /// Only ever set in single-pair mode.
    pub marker: Option<Marker>,
    /// Number of page fetches behind `offers`.
    pub pages: usize,
}

impl BookOffersResponse {
    /// Response document:
    /// `{ ledger_index, ledger_hash?, validated, offers, marker? }`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("ledger_index".into(), json!(self.ledger.index));
        if let Some(hash) = self.ledger.hash {
            doc.insert("ledger_hash".into(), json!(hex::encode_upper(hash)));
        }
        doc.insert("validated".into(), json!(self.ledger.validated));
        doc.insert(
            "offers".into(),
            Value::Array(self.offers.iter().map(|o| o.0.clone()).collect()),
        );
        if let Some(marker) = &self.marker {
            doc.insert("marker".into(), marker.0.clone());
        }
        Value::Object(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(seqs: &[u64], marker: Option<&str>) -> OfferPage {
        OfferPage::new(
            seqs.iter().map(|s| Offer(json!({"seq": s}))).collect(),
            marker.map(|m| Marker(json!(m))),
        )
    }

    #[test]
    fn concatenates_in_call_order() {
        let mut agg = OfferAggregator::new();
        agg.append(page(&[3, 1], None));
        agg.append(page(&[], None));
        agg.append(page(&[1, 9, 2], None));
        assert_eq!(agg.page_count(), 3);
        assert_eq!(agg.offer_count(), 5);

        let resp = agg.finish(LedgerInfo::default(), None);
        let seqs: Vec<u64> = resp
            .offers
            .iter()
            .map(|o| o.0["seq"].as_u64().unwrap())
            .collect();
        assert_eq!(seqs, vec![3, 1, 1, 9, 2]);
    }

    #[test]
    fn append_returns_page_marker() {
        let mut agg = OfferAggregator::new();
        assert_eq!(agg.append(page(&[1], Some("next"))), Some(Marker(json!("next"))));
        assert_eq!(agg.append(page(&[2], None)), None);
    }

    #[test]
    fn extend_counts_page_and_drops_marker() {
        let mut agg = OfferAggregator::new();
        agg.extend(page(&[4, 5], Some("next")));
        assert_eq!(agg.page_count(), 1);
        assert_eq!(agg.offer_count(), 2);
        let resp = agg.finish(LedgerInfo::default(), None);
        assert!(resp.marker.is_none());
    }

    #[test]
    fn json_document_shape() {
        let ledger = LedgerInfo {
            index: 42,
            hash: Some([0xAB; 32]),
            validated: true,
        };
        let mut agg = OfferAggregator::new();
        let marker = agg.append(page(&[7], Some("resume")));
        let doc = agg.finish(ledger, marker).to_json();

        assert_eq!(doc["ledger_index"], 42);
        assert_eq!(doc["ledger_hash"], json!("AB".repeat(32)));
        assert_eq!(doc["validated"], true);
        assert_eq!(doc["offers"], json!([{"seq": 7}]));
        assert_eq!(doc["marker"], "resume");
    }

    #[test]
    fn json_omits_absent_fields() {
        let doc = OfferAggregator::new()
            .finish(LedgerInfo::default(), None)
            .to_json();
        assert!(doc.get("ledger_hash").is_none());
        assert!(doc.get("marker").is_none());
        assert_eq!(doc["offers"], json!([]));
    }
}
