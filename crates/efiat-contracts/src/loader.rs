use crate::descriptor::ContractDescriptor;
use crate::proxy::ContractProxy;
use crate::signer::WalletSigner;
use efiat_error::Result;
use efiat_traits::{DescriptorSource, WalletProvider};

/// Loads one proxy per descriptor location, in order.
///
/// The output is index-aligned with `locations`. Descriptors are fetched one
/// after another; the first failure aborts the whole load and nothing is
/// retried or cached.
pub async fn load_contracts<S, P, L>(
    source: &S,
    locations: &[L],
    signer: &WalletSigner<P>,
) -> Result<Vec<ContractProxy<P>>>
where
    S: DescriptorSource + ?Sized,
    P: WalletProvider,
    L: AsRef<str>,
{
    let mut proxies = Vec::with_capacity(locations.len());
    for location in locations {
        let location = location.as_ref();
        log::debug!("fetching descriptor {location}");
        let document = source.fetch_json(location).await?;
        let descriptor = ContractDescriptor::from_json(location, &document)?;

        let name = descriptor
            .contract_name
            .clone()
            .unwrap_or_else(|| artifact_stem(location).to_string());
        let latest = descriptor
            .latest_deployment()
            .map(|(key, record)| (key.to_string(), record.clone()));
        match &latest {
            Some((key, record)) => log::info!(
                "{name}: using deployment {key} at {}",
                record.address.as_deref().unwrap_or("<no address>")
            ),
            None => log::warn!("{name}: descriptor {location} has no deployments"),
        }

        proxies.push(ContractProxy::new(
            name,
            latest.as_ref().map(|(_, record)| record),
            descriptor.abi,
            signer.clone(),
        ));
    }
    Ok(proxies)
}

/// `./../build/contracts/MockWETH.json` -> `MockWETH`
fn artifact_stem(location: &str) -> &str {
    let file = location.rsplit('/').next().unwrap_or(location);
    file.strip_suffix(".json").unwrap_or(file)
}
