// SPDX-License-Identifier: Apache-2.0

//! Versioned encoding of contracts.
//!
//! Every payload is wrapped in an envelope carrying [`SCHEMA_VERSION`], so a
//! reader can refuse layouts it does not understand instead of guessing.
//! CBOR is the wire format between services; JSON is used for files and
//! for humans.

use super::contract::Contract;

use serde::{Deserialize, Serialize};

/// The envelope layout written by this crate.
pub const SCHEMA_VERSION: u16 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to encode cbor: {0}")]
    CborEncode(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("failed to decode cbor: {0}")]
    CborDecode(#[from] ciborium::de::Error<std::io::Error>),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {0} (expected {})", SCHEMA_VERSION)]
    UnsupportedSchema(u16),
}

#[derive(Serialize)]
struct One<'a> {
    schema: u16,
    contract: &'a Contract,
}

#[derive(Serialize)]
struct Many<'a> {
    schema: u16,
    contracts: &'a [Contract],
}

#[derive(Deserialize)]
struct OneOwned {
    schema: u16,
    contract: Contract,
}

#[derive(Deserialize)]
struct ManyOwned {
    schema: u16,
    #[serde(default)]
    contracts: Vec<Contract>,
}

fn check(schema: u16) -> Result<(), Error> {
    match schema {
        SCHEMA_VERSION => Ok(()),
        other => Err(Error::UnsupportedSchema(other)),
    }
}

fn one(contract: &Contract) -> One<'_> {
    One {
        schema: SCHEMA_VERSION,
        contract,
    }
}

fn many(contracts: &[Contract]) -> Many<'_> {
    Many {
        schema: SCHEMA_VERSION,
        contracts,
    }
}

pub fn to_cbor(contract: &Contract) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    ciborium::ser::into_writer(&one(contract), &mut buffer)?;
    Ok(buffer)
}

pub fn from_cbor(bytes: &[u8]) -> Result<Contract, Error> {
    let envelope: OneOwned = ciborium::de::from_reader(bytes)?;
    check(envelope.schema)?;
    Ok(envelope.contract)
}

pub fn to_cbor_list(contracts: &[Contract]) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    ciborium::ser::into_writer(&many(contracts), &mut buffer)?;
    Ok(buffer)
}

pub fn from_cbor_list(bytes: &[u8]) -> Result<Vec<Contract>, Error> {
    let envelope: ManyOwned = ciborium::de::from_reader(bytes)?;
    check(envelope.schema)?;
    Ok(envelope.contracts)
}

pub fn to_json(contract: &Contract) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&one(contract))?)
}

pub fn from_json(text: &str) -> Result<Contract, Error> {
    let envelope: OneOwned = serde_json::from_str(text)?;
    check(envelope.schema)?;
    Ok(envelope.contract)
}

pub fn to_json_list(contracts: &[Contract]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&many(contracts))?)
}

pub fn from_json_list(text: &str) -> Result<Vec<Contract>, Error> {
    let envelope: ManyOwned = serde_json::from_str(text)?;
    check(envelope.schema)?;
    Ok(envelope.contracts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContractItem, ContractType, PluginContract, PluginContractDirection};

    use serde_json::{json, Value};

    fn sample() -> Contract {
        Contract::new()
            .with_id("c1")
            .with_name("Temperature")
            .with_version(1)
            .with_contract_type(ContractType::Sdk)
            .with_contract_items(vec![ContractItem::new("read")])
            .with_plugin_contracts(vec![PluginContract {
                id: None,
                plugin_id: Some("p1".into()),
                direction: PluginContractDirection::Out,
            }])
    }

    #[test]
    fn json_uses_stable_keys() {
        let text = to_json(&sample()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["schema"], json!(SCHEMA_VERSION));

        let fields = value["contract"].as_object().unwrap();
        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["contractItems", "id", "name", "pluginContracts", "type", "version"]
        );

        assert_eq!(fields["type"], json!("sdk"));
        assert_eq!(fields["pluginContracts"][0]["pluginId"], json!("p1"));
        assert_eq!(fields["pluginContracts"][0]["direction"], json!("out"));
    }

    #[test]
    fn cbor_preserves_the_record() {
        let contract = sample();
        let bytes = to_cbor(&contract).unwrap();
        assert_eq!(from_cbor(&bytes).unwrap(), contract);

        let list = vec![contract, Contract::new()];
        let bytes = to_cbor_list(&list).unwrap();
        assert_eq!(from_cbor_list(&bytes).unwrap(), list);
    }

    #[test]
    fn missing_fields_decode_as_unset() {
        let contract = from_json(r#"{"schema": 1, "contract": {"name": "bare"}}"#).unwrap();
        assert_eq!(contract.name(), Some("bare"));
        assert_eq!(contract.id(), None);
        assert_eq!(contract.version(), None);
        assert!(contract.contract_items().is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let contract =
            from_json(r#"{"schema": 1, "contract": {"id": "x", "owner": "nobody"}}"#).unwrap();
        assert_eq!(contract.id(), Some("x"));
    }

    #[test]
    fn future_schema_is_rejected() {
        let text = r#"{"schema": 2, "contract": {}}"#;
        match from_json(text) {
            Err(Error::UnsupportedSchema(2)) => {}
            other => panic!("unexpected result: {:?}", other),
        }

        let text = r#"{"schema": 0, "contracts": []}"#;
        assert!(matches!(
            from_json_list(text),
            Err(Error::UnsupportedSchema(0))
        ));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let text = r#"{"schema": 1, "contract": {"type": "desktop"}}"#;
        assert!(matches!(from_json(text), Err(Error::Json(_))));
    }

    #[test]
    fn garbage_cbor_is_an_error() {
        assert!(matches!(
            from_cbor(&[0xff, 0x00, 0x13]),
            Err(Error::CborDecode(_))
        ));
    }
}
