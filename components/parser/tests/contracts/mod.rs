//! Contract test entry point for parser

mod test_contract_compliance;
