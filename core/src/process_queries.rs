//! Run many independent top-documents queries against one engine.

use crate::document::Document;
use crate::error::Result;
use crate::search_server::SearchServer;
use rayon::prelude::*;

/// Evaluate every query in parallel. Slot `i` of the output holds the result of
/// `queries[i]`.
pub fn process_queries<Q>(server: &SearchServer, queries: &[Q]) -> Vec<Result<Vec<Document>>>
where
    Q: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// All hits of all queries, concatenated in query order. Fails with the error
/// of the first malformed query.
pub fn process_queries_joined<Q>(server: &SearchServer, queries: &[Q]) -> Result<Vec<Document>>
where
    Q: AsRef<str> + Sync,
{
    let mut joined = Vec::new();
    for documents in process_queries(server, queries) {
        joined.extend(documents?);
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentStatus, Error};

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in (1..).zip(texts) {
            server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_keep_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries);
        let counts: Vec<usize> = results.iter().map(|r| r.as_ref().unwrap().len()).collect();
        assert_eq!(counts, vec![3, 5, 2]);
        for (query, result) in queries.iter().zip(&results) {
            assert_eq!(result.as_ref().unwrap(), &server.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_concatenates_in_order() {
        let server = server();
        let joined = process_queries_joined(&server, &["nasty rat -not", "curly hair"]).unwrap();
        assert_eq!(joined.len(), 5);
        let last_two: Vec<i32> = joined[3..].iter().map(|d| d.id).collect();
        assert_eq!(last_two, vec![2, 5]);
    }

    #[test]
    fn joined_reports_malformed_query() {
        let server = server();
        let err = process_queries_joined(&server, &["curly", "--bad"]).unwrap_err();
        assert_eq!(err, Error::MalformedQueryWord("--bad".into()));
    }
}
