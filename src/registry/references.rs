/// Field name -> referenced resource tag, shared by every resource.
/// Per-resource meanings (such as `parent`) live on the descriptor.
static REFERENCE_FIELDS: &[(&str, &str)] = &[
    // circuits
    ("circuit", "circuit"),
    ("circuit_type", "circuit_type"),
    ("circuit_termination", "circuit_termination"),
    ("provider", "provider"),
    ("provider_network", "provider_network"),
    // cloud
    ("cloud_account", "cloud_account"),
    ("cloud_network", "cloud_network"),
    ("cloud_resource_type", "cloud_resource_type"),
    ("cloud_service", "cloud_service"),
    // dcim
    ("controller", "controller"),
    ("controller_managed_device_group", "controller_managed_device_group"),
    ("device", "device"),
    ("device_redundancy_group", "device_redundancy_group"),
    ("device_type", "device_type"),
    ("interface", "interface"),
    ("lag", "interface"),
    ("bridge", "interface"),
    ("parent_interface", "interface"),
    ("location", "location"),
    ("location_type", "location_type"),
    ("manufacturer", "manufacturer"),
    ("master", "device"),
    ("module", "module"),
    ("module_type", "module_type"),
    ("parent_device", "device"),
    ("parent_module", "module"),
    ("parent_module_bay", "module_bay"),
    ("platform", "platform"),
    ("power_panel", "power_panel"),
    ("power_port", "power_port"),
    ("power_port_template", "power_port_template"),
    ("rack", "rack"),
    ("rack_group", "rack_group"),
    ("rear_port", "rear_port"),
    ("rear_port_template", "rear_port_template"),
    ("software_image_files", "software_image_file"),
    ("software_version", "software_version"),
    ("virtual_chassis", "virtual_chassis"),
    // extras
    ("contact", "contact"),
    ("custom_field", "custom_field"),
    ("dynamic_group", "dynamic_group"),
    ("metadata_type", "metadata_type"),
    ("relationship", "relationship"),
    ("role", "role"),
    ("secrets_group", "secrets_group"),
    ("status", "status"),
    ("tags", "tag"),
    ("team", "team"),
    // ipam
    ("export_targets", "route_target"),
    ("import_targets", "route_target"),
    ("ip_address", "ip_address"),
    ("nat_inside", "ip_address"),
    ("primary_ip4", "ip_address"),
    ("primary_ip6", "ip_address"),
    ("namespace", "namespace"),
    ("prefix", "prefix"),
    ("rir", "rir"),
    ("tagged_vlans", "vlan"),
    ("untagged_vlan", "vlan"),
    ("vlan", "vlan"),
    ("vlan_group", "vlan_group"),
    ("vrf", "vrf"),
    // tenancy
    ("tenant", "tenant"),
    ("tenant_group", "tenant_group"),
    // users
    ("groups", "group"),
    ("users", "user"),
    // virtualization
    ("cluster", "cluster"),
    ("cluster_group", "cluster_group"),
    ("cluster_type", "cluster_type"),
    ("virtual_machine", "virtual_machine"),
    ("vm_interface", "vm_interface"),
];

/// Resource tag referenced by `field`, if the field is a global reference
pub fn reference_resource(field: &str) -> Option<&'static str> {
    REFERENCE_FIELDS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, tag)| *tag)
}
