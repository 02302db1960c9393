// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Caller identity for attested data.

use std::net::IpAddr;

/// Maps a caller address to the name reported as `vmId`.
///
/// Implementations may block; callers run them on the blocking pool.
pub trait HostResolver: Send + Sync {
    fn hostname(&self, ip: IpAddr) -> String;
}

/// Reverse DNS lookup, falling back to the textual address.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReverseDns;

impl HostResolver for ReverseDns {
    fn hostname(&self, ip: IpAddr) -> String {
        match dns_lookup::lookup_addr(&ip) {
            Ok(name) => name,
            Err(err) => {
                tracing::debug!("[imds] reverse lookup of {} failed: {:?}", ip, err);
                ip.to_string()
            }
        }
    }
}

/// Reports the same name for every caller.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticHost(pub String);

impl HostResolver for StaticHost {
    fn hostname(&self, _ip: IpAddr) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_static_host_ignores_address() {
        let resolver = StaticHost("vm1.internal".to_string());
        assert_eq!(resolver.hostname(IpAddr::V4(Ipv4Addr::LOCALHOST)), "vm1.internal");
        assert_eq!(resolver.hostname(IpAddr::V6(Ipv6Addr::LOCALHOST)), "vm1.internal");
    }

    #[test]
    fn test_reverse_dns_never_empty() {
        let name = ReverseDns.hostname(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(!name.is_empty());
    }

    #[test]
    fn test_resolvers_as_trait_objects() {
        let resolvers: Vec<Box<dyn HostResolver>> = vec![
            Box::new(ReverseDns),
            Box::new(StaticHost("vm1".to_string())),
        ];
        for resolver in resolvers {
            assert!(!resolver.hostname(IpAddr::V4(Ipv4Addr::LOCALHOST)).is_empty());
        }
    }
}
