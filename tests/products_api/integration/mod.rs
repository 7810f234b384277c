mod test_docs;
