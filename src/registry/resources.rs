use super::ResourceDescriptor as R;
use super::ResourceFamily::*;

pub static RESOURCES: &[R] = &[
    // --- Circuits ---
    R::new("circuit", Circuits, "circuits", "cid", &["cid", "provider"], &["cid"]),
    R::new("circuit_termination", Circuits, "circuit-terminations", "circuit", &["circuit", "term_side"], &["circuit", "term_side"]),
    R::new("circuit_type", Circuits, "circuit-types", "name", &["name"], &["name"]),
    R::new("provider", Circuits, "providers", "name", &["name"], &["name"]),
    R::new("provider_network", Circuits, "provider-networks", "name", &["name", "provider"], &["name"]),
    // --- Cloud ---
    R::new("cloud_account", Cloud, "cloud-accounts", "name", &["name"], &["name"]),
    R::new("cloud_network", Cloud, "cloud-networks", "name", &["name"], &["name"])
        .with_references(&[("parent", "cloud_network")]),
    R::new("cloud_network_prefix_assignment", Cloud, "cloud-network-prefix-assignments", "cloud_network", &["cloud_network", "prefix"], &["cloud_network", "prefix"]),
    R::new("cloud_resource_type", Cloud, "cloud-resource-types", "name", &["name"], &["name"]),
    R::new("cloud_service", Cloud, "cloud-services", "name", &["name"], &["name"]),
    R::new("cloud_service_network_assignment", Cloud, "cloud-service-network-assignments", "cloud_service", &["cloud_service", "cloud_network"], &["cloud_service", "cloud_network"]),
    // --- DCIM ---
    R::new("cable", Dcim, "cables", "termination_a_id", &["termination_a_type", "termination_a_id", "termination_b_type", "termination_b_id"], &["termination_a_type", "termination_a_id", "termination_b_type", "termination_b_id"]),
    R::new("console_port", Dcim, "console-ports", "name", &["name", "device"], &["name", "device"]),
    R::new("console_port_template", Dcim, "console-port-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("console_server_port", Dcim, "console-server-ports", "name", &["name", "device"], &["name", "device"]),
    R::new("console_server_port_template", Dcim, "console-server-port-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("controller", Dcim, "controllers", "name", &["name"], &["name"]),
    R::new("controller_managed_device_group", Dcim, "controller-managed-device-groups", "name", &["name", "controller"], &["name"])
        .with_references(&[("parent", "controller_managed_device_group")]),
    R::new("device", Dcim, "devices", "name", &["name"], &["name"]),
    R::new("device_bay", Dcim, "device-bays", "name", &["name", "device"], &["name", "device"])
        .with_references(&[("installed_device", "device")]),
    R::new("device_bay_template", Dcim, "device-bay-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("device_redundancy_group", Dcim, "device-redundancy-groups", "name", &["name"], &["name"]),
    R::new("device_type", Dcim, "device-types", "model", &["model", "manufacturer"], &["model"]),
    R::new("front_port", Dcim, "front-ports", "name", &["name", "device"], &["name", "device"]),
    R::new("front_port_template", Dcim, "front-port-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("interface", Dcim, "interfaces", "name", &["name", "device", "module"], &["name"]),
    R::new("interface_template", Dcim, "interface-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("inventory_item", Dcim, "inventory-items", "name", &["name", "device"], &["name", "device"])
        .with_references(&[("parent", "inventory_item")]),
    R::new("location", Dcim, "locations", "name", &["name", "parent"], &["name"])
        .with_references(&[("parent", "location")]),
    R::new("location_type", Dcim, "location-types", "name", &["name"], &["name"])
        .with_references(&[("parent", "location_type")]),
    R::new("manufacturer", Dcim, "manufacturers", "name", &["name"], &["name"]),
    R::new("module", Dcim, "modules", "serial", &["module_type", "parent_module_bay", "location"], &["module_type"]),
    R::new("module_bay", Dcim, "module-bays", "name", &["name", "parent_device", "parent_module"], &["name"]),
    R::new("module_bay_template", Dcim, "module-bay-templates", "name", &["name", "device_type", "module_type"], &["name"]),
    R::new("module_type", Dcim, "module-types", "model", &["model", "manufacturer"], &["model"]),
    R::new("platform", Dcim, "platforms", "name", &["name"], &["name"]),
    R::new("power_feed", Dcim, "power-feeds", "name", &["name", "power_panel"], &["name", "power_panel"]),
    R::new("power_outlet", Dcim, "power-outlets", "name", &["name", "device"], &["name", "device"]),
    R::new("power_outlet_template", Dcim, "power-outlet-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("power_panel", Dcim, "power-panels", "name", &["name", "location"], &["name"]),
    R::new("power_port", Dcim, "power-ports", "name", &["name", "device"], &["name", "device"]),
    R::new("power_port_template", Dcim, "power-port-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("rack", Dcim, "racks", "name", &["name", "location"], &["name"]),
    R::new("rack_group", Dcim, "rack-groups", "name", &["name", "location"], &["name"])
        .with_references(&[("parent", "rack_group")]),
    R::new("rear_port", Dcim, "rear-ports", "name", &["name", "device"], &["name", "device"]),
    R::new("rear_port_template", Dcim, "rear-port-templates", "name", &["name", "device_type"], &["name", "device_type"]),
    R::new("software_image_file", Dcim, "software-image-files", "image_file_name", &["image_file_name", "software_version"], &["image_file_name"]),
    R::new("software_version", Dcim, "software-versions", "version", &["version", "platform"], &["version"]),
    R::new("virtual_chassis", Dcim, "virtual-chassis", "name", &["name"], &["name"]),
    // --- Extras ---
    R::new("contact", Extras, "contacts", "name", &["name"], &["name"]),
    R::new("custom_field", Extras, "custom-fields", "label", &["label"], &["label"]),
    R::new("custom_field_choice", Extras, "custom-field-choices", "value", &["value", "custom_field"], &["value", "custom_field"]),
    R::new("dynamic_group", Extras, "dynamic-groups", "name", &["name"], &["name"]),
    R::new("job_button", Extras, "job-buttons", "name", &["name"], &["name"]),
    R::new("metadata_type", Extras, "metadata-types", "name", &["name"], &["name"]),
    R::new("relationship", Extras, "relationships", "label", &["label"], &["label"]),
    R::new("relationship_association", Extras, "relationship-associations", "source_id", &["relationship", "source_type", "source_id", "destination_type", "destination_id"], &["relationship", "source_type", "source_id", "destination_type", "destination_id"]),
    R::new("role", Extras, "roles", "name", &["name"], &["name"]),
    R::new("secret", Extras, "secrets", "name", &["name"], &["name"]),
    R::new("secrets_group", Extras, "secrets-groups", "name", &["name"], &["name"]),
    R::new("static_group_association", Extras, "static-group-associations", "associated_object_id", &["dynamic_group", "associated_object_type", "associated_object_id"], &["dynamic_group", "associated_object_type", "associated_object_id"]),
    R::new("status", Extras, "statuses", "name", &["name"], &["name"]),
    R::new("tag", Extras, "tags", "name", &["name"], &["name"]),
    R::new("team", Extras, "teams", "name", &["name"], &["name"]),
    // --- IPAM ---
    R::new("ip_address", Ipam, "ip-addresses", "address", &["address", "namespace"], &["address"])
        .with_references(&[("parent", "prefix")])
        .with_write_only(&["namespace"]),
    R::new("ip_address_to_interface", Ipam, "ip-address-to-interface", "ip_address", &["ip_address", "interface", "vm_interface"], &["ip_address"]),
    R::new("namespace", Ipam, "namespaces", "name", &["name"], &["name"]),
    R::new("prefix", Ipam, "prefixes", "prefix", &["prefix", "namespace"], &["prefix"]),
    R::new("rir", Ipam, "rirs", "name", &["name"], &["name"]),
    R::new("route_target", Ipam, "route-targets", "name", &["name"], &["name"]),
    R::new("service", Ipam, "services", "name", &["name", "device", "virtual_machine"], &["name"]),
    R::new("vlan", Ipam, "vlans", "name", &["name", "vid", "vlan_group", "tenant"], &["name"]),
    R::new("vlan_group", Ipam, "vlan-groups", "name", &["name", "location"], &["name"]),
    R::new("vrf", Ipam, "vrfs", "name", &["name", "namespace"], &["name"]),
    R::new("vrf_prefix_assignment", Ipam, "vrf-prefix-assignments", "vrf", &["vrf", "prefix"], &["vrf", "prefix"]),
    // --- Tenancy ---
    R::new("tenant", Tenancy, "tenants", "name", &["name"], &["name"]),
    R::new("tenant_group", Tenancy, "tenant-groups", "name", &["name"], &["name"])
        .with_references(&[("parent", "tenant_group")]),
    // --- Users ---
    R::new("group", Users, "groups", "name", &["name"], &["name"]),
    R::new("permission", Users, "permissions", "name", &["name"], &["name"]),
    R::new("user", Users, "users", "username", &["username"], &["username"])
        .with_write_only(&["password"]),
    // --- Virtualization ---
    R::new("cluster", Virtualization, "clusters", "name", &["name"], &["name"]),
    R::new("cluster_group", Virtualization, "cluster-groups", "name", &["name"], &["name"]),
    R::new("cluster_type", Virtualization, "cluster-types", "name", &["name"], &["name"]),
    R::new("virtual_machine", Virtualization, "virtual-machines", "name", &["name", "cluster"], &["name"]),
    R::new("vm_interface", Virtualization, "interfaces", "name", &["name", "virtual_machine"], &["name", "virtual_machine"]),
];
