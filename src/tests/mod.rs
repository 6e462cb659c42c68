mod list_sensors;
